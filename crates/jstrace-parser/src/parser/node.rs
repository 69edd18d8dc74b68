//! Node definitions for the arena AST.
//!
//! The analyzer only looks at a handful of JavaScript constructs: programs,
//! blocks, variable declarations, identifiers, functions and calls. Those get
//! dedicated variants with typed data so consumers can match on them
//! exhaustively. Everything else an ESTree parser can produce is kept as
//! [`Node::Other`], which remembers its type name and its children so that
//! traversal still reaches every call nested below it.

use super::base::{NodeIndex, NodeList};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Children of a single node, in source order.
pub type ChildList = SmallVec<[NodeIndex; 4]>;

/// An AST node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Node {
    /// Root of a parsed file.
    Program(SourceFileData),
    /// `{ ... }`
    Block(BlockData),
    /// `var a = 1, b;`
    VariableStatement(VariableData),
    /// A single `name = initializer` binding inside a variable statement.
    VariableDeclaration(VariableDeclarationData),
    Identifier(IdentifierData),
    /// `function name() { ... }` in statement position.
    FunctionDeclaration(FunctionData),
    /// `function name?() { ... }` in expression position.
    FunctionExpression(FunctionData),
    /// `(params) => body`; `body` is a block or a bare expression.
    ArrowFunction(FunctionData),
    CallExpression(CallExprData),
    /// `object.name` or `object[argument]`
    PropertyAccess(AccessExprData),
    ExpressionStatement(ExprStatementData),
    ReturnStatement(ReturnData),
    Literal(LiteralData),
    /// Any construct without a dedicated variant.
    Other(OtherData),
}

/// Data for the program root
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceFileData {
    pub statements: NodeList,
}

/// Data for block statements
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockData {
    pub statements: NodeList,
}

/// Declaration keyword of a variable statement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    #[default]
    Var,
    Let,
    Const,
    Using,
    AwaitUsing,
}

impl VariableKind {
    pub fn from_keyword(keyword: &str) -> Option<VariableKind> {
        match keyword {
            "var" => Some(VariableKind::Var),
            "let" => Some(VariableKind::Let),
            "const" => Some(VariableKind::Const),
            "using" => Some(VariableKind::Using),
            "await using" => Some(VariableKind::AwaitUsing),
            _ => None,
        }
    }
}

/// Data for variable statements
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableData {
    pub kind: VariableKind,
    pub declarations: NodeList,
}

/// Data for a single variable binding.
///
/// `name` is an identifier for simple bindings and an `Other` pattern node
/// for destructuring. `initializer` is `NONE` for `var a;`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Data for identifiers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// Data shared by function declarations, function expressions and arrows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionData {
    /// Identifier node, `NONE` for anonymous functions and arrows.
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub body: NodeIndex,
    pub is_async: bool,
    pub asterisk: bool,
}

/// Data for call expressions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallExprData {
    /// The callee.
    pub expression: NodeIndex,
    pub arguments: NodeList,
    pub optional: bool,
}

/// Data for property access (`a.b`) and element access (`a[b]`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
    pub computed: bool,
}

/// Data for expression statements
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

/// Data for return statements
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReturnData {
    /// `NONE` for a bare `return;`
    pub expression: NodeIndex,
}

/// Data for literals. `text` is the raw source text when known.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralData {
    pub text: String,
}

/// Data for nodes without a dedicated variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherData {
    /// ESTree `type` of the imported node (e.g. `IfStatement`).
    pub type_name: String,
    pub children: NodeList,
}

/// Per-node information kept alongside the node itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
    /// Start offset in the source text (0 when unknown).
    pub pos: u32,
    /// End offset in the source text (0 when unknown).
    pub end: u32,
}

/// Arena-based storage for AST nodes.
///
/// Nodes are stored contiguously and referenced by [`NodeIndex`]. Children
/// are always created before their parents, so a node's index is greater than
/// the index of every node below it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
    pub(crate) extended_info: Vec<ExtendedNodeInfo>,
}
