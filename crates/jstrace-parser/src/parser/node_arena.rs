//! NodeArena creation methods (add_* methods).
//!
//! Nodes are built bottom-up: every child handle passed to an `add_*` method
//! must already exist in the arena. Adding a node records it as the parent of
//! each of its children.

use super::base::{NodeIndex, NodeList};
use super::node::*;

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
            extended_info: Vec::with_capacity(capacity),
        }
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if child.is_none() {
            return;
        }
        if let Some(info) = self.extended_info.get_mut(child.0 as usize) {
            info.parent = parent;
        }
    }

    /// Set the source span of an existing node.
    pub fn set_span(&mut self, index: NodeIndex, pos: u32, end: u32) {
        if let Some(info) = self.get_extended_mut(index) {
            info.pos = pos;
            info.end = end;
        }
    }

    // ============================================================================
    // Node Creation Methods
    // ============================================================================

    /// Add a node to the arena and return its index.
    ///
    /// All children referenced by `node` become children of the new index.
    pub fn add_node(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        for child in node.children() {
            self.set_parent(child, index);
        }
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        index
    }

    pub fn add_program(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(Node::Program(SourceFileData {
            statements: statements.into(),
        }))
    }

    pub fn add_block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(Node::Block(BlockData {
            statements: statements.into(),
        }))
    }

    pub fn add_identifier(&mut self, text: impl Into<String>) -> NodeIndex {
        self.add_node(Node::Identifier(IdentifierData {
            escaped_text: text.into(),
        }))
    }

    pub fn add_literal(&mut self, text: impl Into<String>) -> NodeIndex {
        self.add_node(Node::Literal(LiteralData { text: text.into() }))
    }

    pub fn add_variable_statement(
        &mut self,
        kind: VariableKind,
        declarations: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.add_node(Node::VariableStatement(VariableData {
            kind,
            declarations: declarations.into(),
        }))
    }

    /// Add a `name = initializer` binding. Pass `NONE` for a missing initializer.
    pub fn add_variable_declaration(&mut self, name: NodeIndex, initializer: NodeIndex) -> NodeIndex {
        self.add_node(Node::VariableDeclaration(VariableDeclarationData { name, initializer }))
    }

    pub fn add_function_declaration(
        &mut self,
        name: NodeIndex,
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add_node(Node::FunctionDeclaration(FunctionData::new(name, parameters, body)))
    }

    /// Add a function expression. Pass `NONE` as `name` for an anonymous one.
    pub fn add_function_expression(
        &mut self,
        name: NodeIndex,
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add_node(Node::FunctionExpression(FunctionData::new(name, parameters, body)))
    }

    pub fn add_arrow_function(&mut self, parameters: Vec<NodeIndex>, body: NodeIndex) -> NodeIndex {
        self.add_node(Node::ArrowFunction(FunctionData::new(
            NodeIndex::NONE,
            parameters,
            body,
        )))
    }

    pub fn add_call_expression(&mut self, expression: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(Node::CallExpression(CallExprData {
            expression,
            arguments: arguments.into(),
            optional: false,
        }))
    }

    /// Add `expression.name`.
    pub fn add_property_access(&mut self, expression: NodeIndex, name: NodeIndex) -> NodeIndex {
        self.add_node(Node::PropertyAccess(AccessExprData {
            expression,
            name_or_argument: name,
            computed: false,
        }))
    }

    /// Add `expression[argument]`.
    pub fn add_element_access(&mut self, expression: NodeIndex, argument: NodeIndex) -> NodeIndex {
        self.add_node(Node::PropertyAccess(AccessExprData {
            expression,
            name_or_argument: argument,
            computed: true,
        }))
    }

    pub fn add_expression_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add_node(Node::ExpressionStatement(ExprStatementData { expression }))
    }

    /// Add a return statement. Pass `NONE` for a bare `return;`.
    pub fn add_return_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add_node(Node::ReturnStatement(ReturnData { expression }))
    }

    pub fn add_other(&mut self, type_name: impl Into<String>, children: Vec<NodeIndex>) -> NodeIndex {
        self.add_node(Node::Other(OtherData {
            type_name: type_name.into(),
            children: children.into(),
        }))
    }
}

impl FunctionData {
    pub fn new(name: NodeIndex, parameters: Vec<NodeIndex>, body: NodeIndex) -> FunctionData {
        FunctionData {
            name,
            parameters: NodeList::from(parameters),
            body,
            is_async: false,
            asterisk: false,
        }
    }
}
