//! NodeArena access methods and node kind predicates.

use super::base::NodeIndex;
use super::node::*;

// =============================================================================
// Node Kind Predicates
// =============================================================================

impl Node {
    #[inline]
    pub fn is_block(&self) -> bool {
        matches!(self, Node::Block(_))
    }

    #[inline]
    pub fn is_identifier(&self) -> bool {
        matches!(self, Node::Identifier(_))
    }

    #[inline]
    pub fn is_function_expression(&self) -> bool {
        matches!(self, Node::FunctionExpression(_))
    }

    /// True for a single `name = initializer` binding (not the statement).
    #[inline]
    pub fn is_variable_declaration(&self) -> bool {
        matches!(self, Node::VariableDeclaration(_))
    }

    #[inline]
    pub fn is_call_expression(&self) -> bool {
        matches!(self, Node::CallExpression(_))
    }

    /// Function declarations, function expressions and arrow functions.
    #[inline]
    pub fn is_function_like(&self) -> bool {
        matches!(
            self,
            Node::FunctionDeclaration(_) | Node::FunctionExpression(_) | Node::ArrowFunction(_)
        )
    }

    /// ESTree-style name of the node kind, for logs and diagnostics.
    pub fn kind_name(&self) -> &str {
        match self {
            Node::Program(_) => "Program",
            Node::Block(_) => "BlockStatement",
            Node::VariableStatement(_) => "VariableDeclaration",
            Node::VariableDeclaration(_) => "VariableDeclarator",
            Node::Identifier(_) => "Identifier",
            Node::FunctionDeclaration(_) => "FunctionDeclaration",
            Node::FunctionExpression(_) => "FunctionExpression",
            Node::ArrowFunction(_) => "ArrowFunctionExpression",
            Node::CallExpression(_) => "CallExpression",
            Node::PropertyAccess(_) => "MemberExpression",
            Node::ExpressionStatement(_) => "ExpressionStatement",
            Node::ReturnStatement(_) => "ReturnStatement",
            Node::Literal(_) => "Literal",
            Node::Other(data) => &data.type_name,
        }
    }

    /// Direct children in source order. Absent (`NONE`) children are skipped.
    pub fn children(&self) -> ChildList {
        let mut children = ChildList::new();

        let add_opt = |children: &mut ChildList, idx: NodeIndex| {
            if idx.is_some() {
                children.push(idx);
            }
        };

        match self {
            Node::Program(data) => children.extend(data.statements.iter()),
            Node::Block(data) => children.extend(data.statements.iter()),
            Node::VariableStatement(data) => children.extend(data.declarations.iter()),
            Node::VariableDeclaration(data) => {
                add_opt(&mut children, data.name);
                add_opt(&mut children, data.initializer);
            }
            Node::FunctionDeclaration(data)
            | Node::FunctionExpression(data)
            | Node::ArrowFunction(data) => {
                add_opt(&mut children, data.name);
                children.extend(data.parameters.iter());
                add_opt(&mut children, data.body);
            }
            Node::CallExpression(data) => {
                add_opt(&mut children, data.expression);
                children.extend(data.arguments.iter());
            }
            Node::PropertyAccess(data) => {
                add_opt(&mut children, data.expression);
                add_opt(&mut children, data.name_or_argument);
            }
            Node::ExpressionStatement(data) => add_opt(&mut children, data.expression),
            Node::ReturnStatement(data) => add_opt(&mut children, data.expression),
            Node::Other(data) => children.extend(data.children.iter().filter(|c| c.is_some())),
            Node::Identifier(_) | Node::Literal(_) => {}
        }

        children
    }
}

// =============================================================================
// Arena Accessors
// =============================================================================

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get extended info for a node
    #[inline]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    #[inline]
    pub(crate) fn get_extended_mut(&mut self, index: NodeIndex) -> Option<&mut ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get_mut(index.0 as usize)
        }
    }

    /// Parent of a node, `NONE` for roots and unknown indices.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    /// Source span `(pos, end)` of a node.
    #[inline]
    pub fn pos_end(&self, index: NodeIndex) -> Option<(u32, u32)> {
        self.get_extended(index).map(|info| (info.pos, info.end))
    }

    /// Get identifier data. Returns None if the node is not an identifier.
    #[inline]
    pub fn get_identifier(&self, index: NodeIndex) -> Option<&IdentifierData> {
        match self.get(index)? {
            Node::Identifier(data) => Some(data),
            _ => None,
        }
    }

    /// Identifier text of a node, if it is an identifier.
    #[inline]
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        self.get_identifier(index).map(|data| data.escaped_text.as_str())
    }

    /// Get function data for any function-like node.
    #[inline]
    pub fn get_function(&self, index: NodeIndex) -> Option<&FunctionData> {
        match self.get(index)? {
            Node::FunctionDeclaration(data)
            | Node::FunctionExpression(data)
            | Node::ArrowFunction(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_variable_declaration(&self, index: NodeIndex) -> Option<&VariableDeclarationData> {
        match self.get(index)? {
            Node::VariableDeclaration(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn get_call_expr(&self, index: NodeIndex) -> Option<&CallExprData> {
        match self.get(index)? {
            Node::CallExpression(data) => Some(data),
            _ => None,
        }
    }

    /// Statements of a `Program` or `Block`.
    pub fn block_statements(&self, index: NodeIndex) -> Option<&[NodeIndex]> {
        match self.get(index)? {
            Node::Program(data) => Some(data.statements.as_slice()),
            Node::Block(data) => Some(data.statements.as_slice()),
            _ => None,
        }
    }

    /// Direct children of a node in source order.
    pub fn get_children(&self, index: NodeIndex) -> ChildList {
        self.get(index).map(Node::children).unwrap_or_default()
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
