//! Names of the rules and terminals produced by the lark grammar.
//!
//! Shared by the parser, which emits these names, and by the evaluator's
//! dispatch table, which maps them to evaluation nodes. A rename here is a
//! grammar change for both sides.

/// Rule node names.
pub mod rule {
    pub const MULTI_LINE_BLOCK: &str = "multi_line_block";
    pub const LINE: &str = "line";
    pub const ASSIGN_VAR: &str = "assign_var";

    pub const LOGIC_EXPR: &str = "logic_expr";
    pub const DISJUNCTION: &str = "disjunction";
    pub const OR_OP: &str = "or_op";
    pub const CONJUNCTION: &str = "conjunction";
    pub const AND_OP: &str = "and_op";
    pub const NEGATION: &str = "negation";
    pub const NOT_OP: &str = "not_op";

    pub const COMPARISON: &str = "comparison";
    pub const GREATER: &str = "greater";
    pub const GREATER_EQUAL: &str = "greater_equal";
    pub const EQUAL: &str = "equal";
    pub const LESS_EQUAL: &str = "less_equal";
    pub const LESS: &str = "less";
    pub const NOT_EQUAL: &str = "not_equal";

    pub const ARITH_EXPR: &str = "arith_expr";
    pub const SUM: &str = "sum";
    pub const ADDITION: &str = "addition";
    pub const SUBTRACTION: &str = "subtraction";
    pub const PRODUCT: &str = "product";
    pub const MULTIPLICATION: &str = "multiplication";
    pub const DIVISION: &str = "division";

    pub const ATOM: &str = "atom";
    pub const NEG_ATOM: &str = "neg_atom";
    pub const BRACKETED_ARITH_EXPR: &str = "bracketed_arith_expr";
    pub const VARIABLE: &str = "variable";
}

/// Terminal kinds.
pub mod terminal {
    pub const INT: &str = "INT";
    pub const SIGNED_FLOAT: &str = "SIGNED_FLOAT";
    pub const TRUE: &str = "TRUE";
    pub const FALSE: &str = "FALSE";
    pub const VARNAME: &str = "VARNAME";
}
