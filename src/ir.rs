// Strongly-typed descriptor IR for emission. No `Value` here.

/// The inferred type for one value. Fully resolved before it is embedded in
/// a declaration; only `NamedRef` is looked up by name at assembly time.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Any,
    Unknown,
    /// Terminal type token: "string", "null", "Date", a mapped override, a
    /// callable signature.
    Primitive(String),
    /// Enum-like set of string literals, rendered as a union.
    LiteralUnion(Vec<String>),
    ArrayOf(Box<TypeDescriptor>),
    /// Fixed-length positional tuple; repeats are kept, never compressed.
    Tuple(Vec<TypeDescriptor>),
    /// Reference to a separately declared record.
    NamedRef(String),
    /// Braces-delimited record body; Flattened strategy only.
    InlineBody(Vec<FieldDecl>),
    /// Keyed-collection or wrapper type with 0-2 parameters
    /// (`Set<string>`, `Map<string, number>`, `Promise<unknown>`).
    Generic {
        name: String,
        params: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn array_of(inner: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::ArrayOf(Box::new(inner))
    }

    pub fn primitive(name: impl Into<String>) -> TypeDescriptor {
        TypeDescriptor::Primitive(name.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Already case-transformed and quoted where unsafe.
    pub name: String,
    pub ty: TypeDescriptor,
    pub readonly: bool,
    pub optional: bool,
}

/// One named, emittable type definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub name: String,
    pub exported: bool,
    pub body: DeclBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclBody {
    /// Ordered field list; empty records render as an empty body.
    Interface(Vec<FieldDecl>),
    /// Permissive `[key: string]: any` record for non-object roots.
    IndexSignature(TypeDescriptor),
    /// `type Name = T;` for array and strict scalar roots.
    Alias(TypeDescriptor),
}
