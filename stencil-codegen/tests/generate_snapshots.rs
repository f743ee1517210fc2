//! Snapshot tests for generated sources.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use stencil_codegen::{
    GenerationUnit, Literal, NamespaceStyle, Newline, SourceGenerator, TypeDesc,
    TypeNameFormatter, WriterOptions,
};
use stencil_core::{Constants, Template};

const STRONG_ID: &str = r#"[TypeConverter(typeof($TypeName$Converter))]
public readonly partial struct $TypeName$ : IEquatable<$TypeName$>
{
    public static readonly $TypeName$ Empty = new($DefaultValue$);

    public $TypeName$($ValueType$ value) => Value = value;

    public $ValueType$ Value { get; }
#if EF_CORE // exec

    public sealed class EfCoreValueConverter : ValueConverter<$TypeName$, $ValueType$>
    {
        public EfCoreValueConverter() : base(id => id.Value, value => new $TypeName$(value)) { }
    }
#endif // exec
#if NET6_0_OR_GREATER
    // left untouched without the live marker
#endif

    public override string ToString() => $Prefix$ + Value;
}"#;

fn options() -> WriterOptions {
    WriterOptions::default().with_newline(Newline::Lf)
}

fn order_id() -> GenerationUnit {
    GenerationUnit::new("Shop.Orders", "OrderId")
        .with_value_type(TypeDesc::parse("System.Guid").unwrap())
        .with_replacement("Prefix", "\"ord_\"")
        .with_literal("DefaultValue", Literal::Type(TypeDesc::parse("System.Guid").unwrap()))
}

#[test]
fn test_file_scoped_without_constants() {
    let generator = SourceGenerator::new(options())
        .with_header(["// <auto-generated/>"])
        .with_formatter(TypeNameFormatter::new().with_available_namespaces(["System"]));
    let template = Template::new("StrongId.cs.tmpl", STRONG_ID);

    let source = generator.generate(&template, &order_id()).unwrap();

    assert_eq!(source.hint_name, "Shop.Orders.OrderId.g");
    insta::assert_snapshot!(source.content, @r#"
    // <auto-generated/>

    namespace Shop.Orders;

    [TypeConverter(typeof(OrderIdConverter))]
    public readonly partial struct OrderId : IEquatable<OrderId>
    {
        public static readonly OrderId Empty = new(typeof(Guid));

        public OrderId(Guid value) => Value = value;

        public Guid Value { get; }
    #if NET6_0_OR_GREATER
        // left untouched without the live marker
    #endif

        public override string ToString() => "ord_" + Value;
    }
    "#);
}

#[test]
fn test_block_namespace_with_unit_constant() {
    let generator = SourceGenerator::new(options().with_namespace_style(NamespaceStyle::Block))
        .with_constants(Constants::parse_list("NET6_0_OR_GREATER"));
    let template = Template::new("StrongId.cs.tmpl", STRONG_ID);
    let unit = order_id().with_constant("EF_CORE");

    let source = generator.generate(&template, &unit).unwrap();

    insta::assert_snapshot!(source.content, @r#"
    namespace Shop.Orders
    {
        [TypeConverter(typeof(OrderIdConverter))]
        public readonly partial struct OrderId : IEquatable<OrderId>
        {
            public static readonly OrderId Empty = new(typeof(System.Guid));

            public OrderId(System.Guid value) => Value = value;

            public System.Guid Value { get; }

            public sealed class EfCoreValueConverter : ValueConverter<OrderId, System.Guid>
            {
                public EfCoreValueConverter() : base(id => id.Value, value => new OrderId(value)) { }
            }
        #if NET6_0_OR_GREATER
            // left untouched without the live marker
        #endif

            public override string ToString() => "ord_" + Value;
        }
    }
    "#);
}

#[test]
fn test_crlf_by_default() {
    let generator = SourceGenerator::default();
    let template = Template::new("t", "class $TypeName$ {}");

    let source = generator
        .generate(&template, &GenerationUnit::new("", "Plain"))
        .unwrap();

    assert_eq!(source.hint_name, "Plain.g");
    assert_eq!(source.content, "class Plain {}\r\n");
}
