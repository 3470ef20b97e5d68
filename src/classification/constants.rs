//! Static knowledge tables
//!
//! Qualified type names whose members have a known purity, and the annotation
//! names that carry explicit purity claims.

/// Annotation carrying explicit `pure = true` / `"readonly"` claims
pub const CONTRACT_ANNOTATION: &str = "org.jetbrains.annotations.Contract";

/// Boolean argument of [`CONTRACT_ANNOTATION`] marking a function pure
pub const CONTRACT_PURE_ARGUMENT: &str = "pure";

/// String argument of [`CONTRACT_ANNOTATION`] holding the contract text
pub const CONTRACT_VALUE_ARGUMENT: &str = "value";

/// Contract text marking a function readonly
pub const CONTRACT_READONLY_VALUE: &str = "readonly";

/// Marks compiler intrinsics that can be evaluated at compile time
/// (`Int.plus`, `Int.times`, ...)
pub const CONST_EVALUATION_ANNOTATION: &str = "kotlin.internal.IntrinsicConstEvaluation";

/// Types whose every member is pure
pub const PURE_TYPES: &[&str] = &[
    "kotlin.Int",
    "kotlin.Long",
    "kotlin.Float",
    "kotlin.Double",
    "kotlin.Boolean",
    "kotlin.Char",
    "kotlin.String",
    "kotlin.ranges.IntRange",
    "kotlin.ranges.LongRange",
    "kotlin.ranges.CharRange",
    "kotlin.ranges.FloatRange",
    "kotlin.ranges.DoubleRange",
];

/// Types whose every member only reads state
pub const READONLY_TYPES: &[&str] = &[
    "kotlin.String",
    "kotlin.collections.List",
    "kotlin.collections.Set",
    "kotlin.collections.Map",
    "kotlin.collections.Collection",
    "kotlin.sequences.Sequence",
    "kotlin.text.Regex",
    "kotlin.text.MatchResult",
];

/// Types that hold internal state.
///
/// Calling any member on an instance the analyzed function created itself,
/// and that has not escaped, is treated as pure.
pub const ENCAPSULATED_STATEFUL_TYPES: &[&str] = &[
    "kotlin.collections.ArrayList",
    "kotlin.collections.HashMap",
    "kotlin.collections.LinkedHashMap",
    "kotlin.collections.HashSet",
    "kotlin.collections.LinkedHashSet",
    "kotlin.text.StringBuilder",
    "java.lang.StringBuilder",
];

/// Name the host gives constructors
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Members generated for every class
pub const SYNTHESIZED_MEMBERS: &[&str] = &["equals", "hashCode", "toString"];

/// Members generated for enum classes
pub const SYNTHESIZED_ENUM_MEMBERS: &[&str] = &["values", "valueOf", "compareTo", "clone"];

/// Prefix of compiler-named members: `<init>`, `<get-name>`, `<set-name>`
pub const SYNTHESIZED_NAME_PREFIX: char = '<';

/// Structural copy member generated for data classes
pub const DATA_COPY_MEMBER: &str = "copy";

/// Prefix of positional component accessors generated for data classes
pub const DATA_COMPONENT_PREFIX: &str = "component";
