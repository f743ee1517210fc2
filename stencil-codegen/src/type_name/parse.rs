//! Textual type descriptors.
//!
//! ```text
//! type     := base suffix*
//! base     := keyword | segment ('+' segment)*
//! segment  := ident ('.' ident)* generics?     (dots only in the first segment)
//! generics := '<' ','* '>' | '<' type (',' type)* '>'
//! suffix   := '?' | '[' ','* ']'
//! ```

use std::str::FromStr;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use super::{NamedType, Primitive, TypeDesc};

#[derive(Debug, Error, Diagnostic)]
#[error("invalid type `{input}`: {message}")]
#[diagnostic(code(stencil::type_parse))]
pub struct TypeParseError {
    #[source_code]
    pub input: String,
    pub position: usize,
    pub message: String,
    #[label("here")]
    span: SourceSpan,
}

impl TypeParseError {
    fn new(input: &str, position: usize, message: impl Into<String>) -> Self {
        let len = usize::from(position < input.len());
        Self {
            input: input.to_string(),
            position,
            message: message.into(),
            span: (position, len).into(),
        }
    }
}

impl FromStr for TypeDesc {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TypeDesc {
    /// Parse a textual descriptor such as `Ns.Outer<int>+Inner<string>[]`.
    pub fn parse(input: &str) -> Result<Self, TypeParseError> {
        let mut parser = Parser { input, pos: 0 };
        let ty = parser.parse_type()?;
        parser.skip_ws();
        if parser.pos < input.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(ty)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

/// Generic arguments of one segment.
enum Generics {
    None,
    Open(usize),
    Closed(Vec<TypeDesc>),
}

impl Parser<'_> {
    fn parse_type(&mut self) -> Result<TypeDesc, TypeParseError> {
        let base = self.parse_base()?;
        self.parse_suffixes(base)
    }

    fn parse_base(&mut self) -> Result<TypeDesc, TypeParseError> {
        self.skip_ws();
        let start = self.pos;
        let path = self.parse_path()?;

        let generics = self.parse_generics()?;
        if matches!(generics, Generics::None)
            && !self.at('+')
            && let Some(primitive) =
                Primitive::from_keyword(&path).or_else(|| Primitive::from_runtime_name(&path))
        {
            return Ok(primitive.into());
        }

        let (namespace, name) = match path.rsplit_once('.') {
            Some((namespace, name)) => (Some(namespace), name),
            None => (None, path.as_str()),
        };
        let mut current = self.segment(namespace, name, None, generics, start)?;

        while self.eat('+') {
            let start = self.pos;
            let name = self.parse_ident()?;
            let generics = self.parse_generics()?;
            current = self.segment(None, &name, Some(current), generics, start)?;
        }
        Ok(current.into())
    }

    fn segment(
        &self,
        namespace: Option<&str>,
        name: &str,
        declaring: Option<NamedType>,
        generics: Generics,
        start: usize,
    ) -> Result<NamedType, TypeParseError> {
        let Some(declaring) = declaring else {
            return Ok(match generics {
                Generics::None => NamedType::new(namespace, name),
                Generics::Open(arity) => NamedType::definition(namespace, name, arity),
                Generics::Closed(args) => NamedType::constructed(namespace, name, args),
            });
        };

        let open = declaring.is_definition();
        let own_open = match &generics {
            Generics::Open(arity) => *arity,
            _ => 0,
        };
        let args = match (generics, declaring.args.clone()) {
            (Generics::None | Generics::Open(_), None) => None,
            (Generics::None, Some(inherited)) => Some(inherited),
            (Generics::Open(_), Some(inherited)) if inherited.is_empty() => None,
            (Generics::Closed(own), Some(mut inherited)) => {
                inherited.extend(own);
                Some(inherited)
            }
            _ => {
                return Err(TypeParseError::new(
                    self.input,
                    start,
                    if open {
                        "nested type closes a generic definition"
                    } else {
                        "nested type opens a constructed generic"
                    },
                ));
            }
        };
        let own_arity = match &args {
            Some(args) => args.len().saturating_sub(declaring.arity),
            None => own_open,
        };
        Ok(NamedType::nested(declaring, name, own_arity, args))
    }

    fn parse_path(&mut self) -> Result<String, TypeParseError> {
        let mut path = self.parse_ident()?;
        while self.eat('.') {
            path.push('.');
            path.push_str(&self.parse_ident()?);
        }
        Ok(path)
    }

    fn parse_ident(&mut self) -> Result<String, TypeParseError> {
        self.skip_ws();
        let start = self.pos;
        let len = self
            .rest()
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(self.error("expected an identifier"));
        }
        if self.rest().starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error("identifiers cannot start with a digit"));
        }
        self.pos += len;
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_generics(&mut self) -> Result<Generics, TypeParseError> {
        if !self.eat('<') {
            return Ok(Generics::None);
        }

        self.skip_ws();
        if self.at(',') || self.at('>') {
            let mut arity = 1;
            while self.eat(',') {
                arity += 1;
            }
            self.expect('>')?;
            return Ok(Generics::Open(arity));
        }

        let mut args = vec![self.parse_type()?];
        while self.eat(',') {
            self.skip_ws();
            if self.at(',') || self.at('>') {
                return Err(self.error("cannot mix open and closed generic arguments"));
            }
            args.push(self.parse_type()?);
        }
        self.expect('>')?;
        Ok(Generics::Closed(args))
    }

    /// `?` wraps immediately; a run of array specifiers is applied
    /// innermost-last so `int[][,]` reads as an array of `int[,]`.
    fn parse_suffixes(&mut self, mut ty: TypeDesc) -> Result<TypeDesc, TypeParseError> {
        let mut ranks: Vec<u8> = Vec::new();
        loop {
            if self.eat('?') {
                ty = wrap_arrays(ty, &mut ranks);
                ty = TypeDesc::nullable(ty);
            } else if self.eat('[') {
                let mut rank: u8 = 1;
                while self.eat(',') {
                    rank = rank
                        .checked_add(1)
                        .ok_or_else(|| self.error("array rank too large"))?;
                }
                self.expect(']')?;
                ranks.push(rank);
            } else {
                return Ok(wrap_arrays(ty, &mut ranks));
            }
        }
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn at(&mut self, c: char) -> bool {
        self.skip_ws();
        self.rest().starts_with(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.at(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), TypeParseError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{c}`")))
        }
    }

    fn error(&self, message: impl Into<String>) -> TypeParseError {
        TypeParseError::new(self.input, self.pos, message)
    }
}

fn wrap_arrays(mut ty: TypeDesc, ranks: &mut Vec<u8>) -> TypeDesc {
    while let Some(rank) = ranks.pop() {
        ty = TypeDesc::array(ty, rank);
    }
    ty
}
