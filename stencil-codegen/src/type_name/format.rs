use std::{collections::BTreeSet, sync::Arc};

use super::{NamedType, TypeDesc, TypeNameCache, cache::CacheKey};

/// Whether namespaces are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeNameMode {
    /// Include the namespace unless it is already available.
    Qualified,
    /// Never include namespaces.
    Unqualified,
}

/// Renders [`TypeDesc`]s as type expressions.
///
/// # Example
///
/// ```
/// use stencil_codegen::type_name::{TypeDesc, TypeNameFormatter, TypeNameMode};
///
/// let formatter = TypeNameFormatter::new().with_available_namespaces(["System"]);
/// let ty: TypeDesc = "System.Collections.Generic.Dictionary<System.String, System.Guid[]>"
///     .parse()
///     .unwrap();
///
/// assert_eq!(
///     formatter.format(&ty, TypeNameMode::Qualified),
///     "System.Collections.Generic.Dictionary<string, Guid[]>"
/// );
/// assert_eq!(
///     formatter.format(&ty, TypeNameMode::Unqualified),
///     "Dictionary<string, Guid[]>"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TypeNameFormatter {
    available: Arc<BTreeSet<String>>,
    cache: Option<Arc<TypeNameCache>>,
}

impl TypeNameFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespaces whose types are rendered without their namespace.
    pub fn with_available_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available = Arc::new(namespaces.into_iter().map(Into::into).collect());
        self
    }

    /// Memoize renderings in a shared cache.
    pub fn with_cache(mut self, cache: Arc<TypeNameCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn is_available(&self, namespace: &str) -> bool {
        self.available.contains(namespace)
    }

    /// Render a type expression.
    pub fn format(&self, ty: &TypeDesc, mode: TypeNameMode) -> String {
        match &self.cache {
            Some(cache) => {
                let key = CacheKey::new(ty, mode, &self.available);
                cache.get_or_insert_with(key, || self.render(ty, mode))
            }
            None => self.render(ty, mode),
        }
    }

    /// Render with namespaces (see [`TypeNameMode::Qualified`]).
    pub fn qualified(&self, ty: &TypeDesc) -> String {
        self.format(ty, TypeNameMode::Qualified)
    }

    /// Render without namespaces.
    pub fn unqualified(&self, ty: &TypeDesc) -> String {
        self.format(ty, TypeNameMode::Unqualified)
    }

    fn render(&self, ty: &TypeDesc, mode: TypeNameMode) -> String {
        let mut out = String::new();
        self.write_type(ty, mode, &mut out);
        out
    }

    fn write_type(&self, ty: &TypeDesc, mode: TypeNameMode, out: &mut String) {
        match ty {
            TypeDesc::Primitive(primitive) => out.push_str(primitive.keyword()),
            TypeDesc::Nullable(inner) => {
                self.write_type(inner, mode, out);
                out.push('?');
            }
            TypeDesc::Array { .. } => {
                // Peel one array layer at a time; rank markers follow the
                // innermost element type in outer-to-inner order.
                let mut ranks = String::new();
                let mut current = ty;
                while let TypeDesc::Array { element, rank } = current {
                    ranks.push('[');
                    for _ in 1..*rank {
                        ranks.push(',');
                    }
                    ranks.push(']');
                    current = element;
                }
                self.write_type(current, mode, out);
                out.push_str(&ranks);
            }
            TypeDesc::Named(named) => self.write_named(named, named.args.as_deref(), mode, out),
            TypeDesc::Parameter(name) => out.push_str(name),
        }
    }

    /// `args` is the argument list as reported for the outermost call; each
    /// declaring type receives the prefix matching its own arity.
    fn write_named(
        &self,
        ty: &NamedType,
        args: Option<&[TypeDesc]>,
        mode: TypeNameMode,
        out: &mut String,
    ) {
        let inherited = match &ty.declaring {
            Some(declaring) => {
                let prefix = args.map(|args| &args[..declaring.arity.min(args.len())]);
                self.write_named(declaring, prefix, mode, out);
                out.push('.');
                declaring.arity
            }
            None => {
                if let Some(namespace) = &ty.namespace
                    && mode == TypeNameMode::Qualified
                    && !namespace.is_empty()
                    && !self.is_available(namespace)
                {
                    out.push_str(namespace);
                    out.push('.');
                }
                0
            }
        };

        out.push_str(&ty.name);

        let own = ty.arity.saturating_sub(inherited);
        if own == 0 {
            return;
        }

        out.push('<');
        match args {
            None => {
                for _ in 1..own {
                    out.push(',');
                }
            }
            Some(args) => {
                let own_args = args.get(inherited..).unwrap_or_default();
                for (i, arg) in own_args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(arg, mode, out);
                }
            }
        }
        out.push('>');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_name::Primitive;

    fn int() -> TypeDesc {
        Primitive::Int.into()
    }

    fn string() -> TypeDesc {
        Primitive::String.into()
    }

    #[test]
    fn test_primitives_and_nullable() {
        let f = TypeNameFormatter::new();
        assert_eq!(f.qualified(&int()), "int");
        assert_eq!(f.qualified(&TypeDesc::nullable(int())), "int?");
    }

    #[test]
    fn test_arrays() {
        let f = TypeNameFormatter::new();
        assert_eq!(f.qualified(&TypeDesc::array(int(), 1)), "int[]");
        assert_eq!(f.qualified(&TypeDesc::array(int(), 3)), "int[,,]");

        // An array of two-dimensional arrays.
        let jagged = TypeDesc::array(TypeDesc::array(int(), 2), 1);
        assert_eq!(f.qualified(&jagged), "int[][,]");

        let nullable_elements = TypeDesc::array(TypeDesc::nullable(int()), 1);
        assert_eq!(f.qualified(&nullable_elements), "int?[]");
    }

    #[test]
    fn test_open_generic_definition() {
        let f = TypeNameFormatter::new();
        let dict = NamedType::definition(Some("System.Collections.Generic"), "Dictionary", 2);
        assert_eq!(
            f.qualified(&dict.clone().into()),
            "System.Collections.Generic.Dictionary<,>"
        );
        assert_eq!(f.unqualified(&dict.into()), "Dictionary<,>");

        let list = NamedType::definition(None, "List", 1);
        assert_eq!(f.qualified(&list.into()), "List<>");
    }

    #[test]
    fn test_closed_generic() {
        let f = TypeNameFormatter::new().with_available_namespaces(["System.Collections.Generic"]);
        let dict = NamedType::constructed(
            Some("System.Collections.Generic"),
            "Dictionary",
            vec![string(), TypeDesc::array(int(), 1)],
        );
        assert_eq!(f.qualified(&dict.into()), "Dictionary<string, int[]>");
    }

    #[test]
    fn test_nested_in_generic_slices_arguments() {
        let f = TypeNameFormatter::new();
        let outer = NamedType::definition(Some("Ns"), "Outer", 1);
        let inner = NamedType::nested(outer, "Inner", 1, Some(vec![int(), string()]));
        assert_eq!(f.qualified(&inner.into()), "Ns.Outer<int>.Inner<string>");
    }

    #[test]
    fn test_nested_non_generic_in_generic() {
        let f = TypeNameFormatter::new();
        let outer = NamedType::definition(Some("Ns"), "Outer", 2);
        let inner = NamedType::nested(outer, "Node", 0, Some(vec![int(), string()]));
        assert_eq!(f.unqualified(&inner.into()), "Outer<int, string>.Node");
    }

    #[test]
    fn test_nested_open_definition() {
        let f = TypeNameFormatter::new();
        let outer = NamedType::definition(Some("Ns"), "Outer", 1);
        let inner = NamedType::nested(outer, "Inner", 2, None);
        assert_eq!(f.qualified(&inner.into()), "Ns.Outer<>.Inner<,>");
    }

    #[test]
    fn test_qualified_skips_available_namespace() {
        let f = TypeNameFormatter::new().with_available_namespaces(["System"]);
        let guid = NamedType::new(Some("System"), "Guid");
        let order = NamedType::new(Some("Shop"), "Order");
        assert_eq!(f.qualified(&guid.into()), "Guid");
        assert_eq!(f.qualified(&order.clone().into()), "Shop.Order");
        assert_eq!(f.unqualified(&order.into()), "Order");
    }

    #[test]
    fn test_generic_parameter() {
        let f = TypeNameFormatter::new();
        let list = NamedType::constructed(
            Some("System.Collections.Generic"),
            "List",
            vec![TypeDesc::parameter("T")],
        );
        assert_eq!(f.unqualified(&list.into()), "List<T>");
    }
}
