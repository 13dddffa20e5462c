//! TypeScript type model for declaration output.
//!
//! Transformers build `TsType` values and turn them into text through the
//! [`Emit`](super::emit::Emit) trait. Anything that arrives as finished text
//! (rewritten references, user hook output) is carried as [`TsType::Ref`].

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, unknown, never, undefined
    Primitive(TsPrimitive),
    /// Literal type: "foo", 42, true
    Literal(TsLiteral),
    /// Verbatim type text: a canonical index path, a named type or hook output
    Ref(String),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Tuple type: [A, B, ...C[]]
    Tuple {
        /// Fixed leading slots
        items: Vec<TsType>,
        /// Element type of the variadic tail
        rest: Option<Box<TsType>>,
    },
    /// readonly T
    Readonly(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B & C
    Intersection(Vec<TsType>),
    /// Exclusive union: OneOf<[A, B]>
    OneOf(Vec<TsType>),
    /// Object literal type; empty means an object with no known members
    Object(Vec<TsProp>),
    /// Generic instantiation: Pick<T, K>, Omit<T, K>, Record<K, V>
    Generic {
        /// Name of the generic type
        name: String,
        /// Type arguments in order
        args: Vec<TsType>,
    },
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `unknown`
    Unknown,
    /// `never`
    Never,
    /// `undefined`
    Undefined,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    /// Quoted and escaped on output
    String(String),
    /// Non-integral number
    Number(f64),
    /// Integral number
    Int(i64),
    /// `true` or `false`
    Bool(bool),
    /// `null`
    Null,
}

/// Member key of an object literal type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropKey {
    /// Quoted only when it is not a valid identifier or numeric key
    Name(String),
    /// Always quoted (media types, webhook names)
    Quoted(String),
    /// Emitted as-is: index signatures and template keys
    Raw(String),
}

/// Object member definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Member key
    pub key: PropKey,
    /// Member type
    pub ty: TsType,
    /// Rendered with `?`
    pub optional: bool,
    /// Rendered with `readonly`
    pub readonly: bool,
    /// JSDoc text rendered above the member
    pub doc: Option<String>,
}

impl TsProp {
    /// A required, mutable member without documentation.
    pub fn new(key: PropKey, ty: TsType) -> Self {
        Self {
            key,
            ty,
            optional: false,
            readonly: false,
            doc: None,
        }
    }

    /// Set whether the member is optional.
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Set whether the member is readonly.
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Attach JSDoc text.
    pub fn doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }
}

impl TsType {
    /// `string`
    pub const fn string() -> Self {
        Self::Primitive(TsPrimitive::String)
    }

    /// `number`
    pub const fn number() -> Self {
        Self::Primitive(TsPrimitive::Number)
    }

    /// `null`
    pub const fn null() -> Self {
        Self::Primitive(TsPrimitive::Null)
    }

    /// `unknown`
    pub const fn unknown() -> Self {
        Self::Primitive(TsPrimitive::Unknown)
    }

    /// `never`
    pub const fn never() -> Self {
        Self::Primitive(TsPrimitive::Never)
    }

    /// Verbatim type text.
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Ref(text.into())
    }

    /// `readonly T` when `readonly` holds, `T` otherwise.
    pub fn readonly_if(self, readonly: bool) -> Self {
        if readonly {
            Self::Readonly(Box::new(self))
        } else {
            self
        }
    }

    /// Union of `self` and null.
    pub fn or_null(self) -> Self {
        Self::Union(vec![self, Self::null()])
    }

    /// Whether the rendered type contains an object literal somewhere.
    pub fn contains_object_literal(&self) -> bool {
        match self {
            Self::Object(props) => !props.is_empty(),
            Self::Ref(text) => text.contains('{'),
            Self::Array(inner) | Self::Readonly(inner) => inner.contains_object_literal(),
            Self::Tuple { items, rest } => {
                items.iter().any(Self::contains_object_literal)
                    || rest.as_ref().is_some_and(|r| r.contains_object_literal())
            }
            Self::Union(types) | Self::Intersection(types) | Self::OneOf(types) => {
                types.iter().any(Self::contains_object_literal)
            }
            Self::Generic { args, .. } => args.iter().any(Self::contains_object_literal),
            Self::Primitive(_) | Self::Literal(_) => false,
        }
    }
}
