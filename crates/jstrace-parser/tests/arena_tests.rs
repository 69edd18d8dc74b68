//! Tests for arena construction, parent links and node predicates.
use jstrace_parser::parser::{Node, NodeArena, NodeIndex, VariableKind};

#[test]
fn test_node_index_none() {
    let index = NodeIndex(0);
    assert!(index.is_some());
    assert!(!index.is_none());
    assert_eq!(index.into_option(), Some(index));

    let none = NodeIndex::NONE;
    assert!(none.is_none());
    assert!(!none.is_some());
    assert_eq!(none.into_option(), None);
    assert_eq!(NodeIndex::default(), NodeIndex::NONE);
}

#[test]
fn test_add_node_sets_parents_of_children() {
    let mut arena = NodeArena::new();
    let name = arena.add_identifier("f");
    let ret = arena.add_return_statement(NodeIndex::NONE);
    let body = arena.add_block(vec![ret]);
    let func = arena.add_function_expression(NodeIndex::NONE, vec![], body);
    let decl = arena.add_variable_declaration(name, func);
    let stmt = arena.add_variable_statement(VariableKind::Var, vec![decl]);
    let program = arena.add_program(vec![stmt]);

    assert_eq!(arena.parent(ret), body);
    assert_eq!(arena.parent(body), func);
    assert_eq!(arena.parent(func), decl);
    assert_eq!(arena.parent(name), decl);
    assert_eq!(arena.parent(decl), stmt);
    assert_eq!(arena.parent(stmt), program);
    assert!(arena.parent(program).is_none());
    assert!(arena.parent(NodeIndex(1000)).is_none());
}

#[test]
fn test_children_follow_source_order_and_skip_missing() {
    let mut arena = NodeArena::new();
    let name = arena.add_identifier("g");
    let param = arena.add_identifier("x");
    let body = arena.add_block(vec![]);
    let func = arena.add_function_expression(name, vec![param], body);
    assert_eq!(arena.get_children(func).as_slice(), &[name, param, body]);

    let anonymous_body = arena.add_block(vec![]);
    let anonymous = arena.add_function_expression(NodeIndex::NONE, vec![], anonymous_body);
    assert_eq!(arena.get_children(anonymous).as_slice(), &[anonymous_body]);

    let target = arena.add_identifier("y");
    let uninitialized = arena.add_variable_declaration(target, NodeIndex::NONE);
    assert_eq!(arena.get_children(uninitialized).as_slice(), &[target]);
}

#[test]
fn test_kind_predicates() {
    let mut arena = NodeArena::new();
    let ident = arena.add_identifier("a");
    let body = arena.add_block(vec![]);
    let func = arena.add_function_expression(NodeIndex::NONE, vec![], body);
    let arrow_body = arena.add_literal("1");
    let arrow = arena.add_arrow_function(vec![], arrow_body);
    let decl_name = arena.add_identifier("b");
    let decl = arena.add_variable_declaration(decl_name, func);
    let call = arena.add_call_expression(ident, vec![]);

    let node = |idx| arena.get(idx).expect("node exists");
    assert!(node(ident).is_identifier());
    assert!(!node(ident).is_function_expression());
    assert!(node(func).is_function_expression());
    assert!(node(func).is_function_like());
    assert!(node(arrow).is_function_like());
    assert!(!node(arrow).is_function_expression());
    assert!(node(decl).is_variable_declaration());
    assert!(node(body).is_block());
    assert!(node(call).is_call_expression());
    assert_eq!(node(decl).kind_name(), "VariableDeclarator");
}

#[test]
fn test_typed_getters() {
    let mut arena = NodeArena::new();
    let callee = arena.add_identifier("run");
    let arg = arena.add_literal("42");
    let call = arena.add_call_expression(callee, vec![arg]);
    let stmt = arena.add_expression_statement(call);
    let block = arena.add_block(vec![stmt]);

    assert_eq!(arena.identifier_text(callee), Some("run"));
    assert_eq!(arena.identifier_text(arg), None);
    let data = arena.get_call_expr(call).expect("call data");
    assert_eq!(data.expression, callee);
    assert_eq!(data.arguments.as_slice(), &[arg]);
    assert_eq!(arena.block_statements(block), Some(&[stmt][..]));
    assert!(arena.block_statements(stmt).is_none());
    assert!(arena.get_function(block).is_none());
}

#[test]
fn test_other_nodes_keep_children() {
    let mut arena = NodeArena::new();
    let test = arena.add_identifier("cond");
    let consequent = arena.add_block(vec![]);
    let if_stmt = arena.add_other("IfStatement", vec![test, consequent]);

    assert_eq!(arena.get(if_stmt).map(Node::kind_name), Some("IfStatement"));
    assert_eq!(arena.parent(consequent), if_stmt);
    assert_eq!(arena.get_children(if_stmt).len(), 2);
}

#[test]
fn test_arena_serde_round_trip_keeps_parents() {
    let mut arena = NodeArena::new();
    let callee = arena.add_identifier("f");
    let call = arena.add_call_expression(callee, vec![]);
    let stmt = arena.add_expression_statement(call);
    let program = arena.add_program(vec![stmt]);
    arena.set_span(call, 3, 6);

    let json = serde_json::to_string(&arena).expect("serialize arena");
    let restored: NodeArena = serde_json::from_str(&json).expect("deserialize arena");

    assert_eq!(restored.len(), arena.len());
    assert_eq!(restored.parent(stmt), program);
    assert_eq!(restored.pos_end(call), Some((3, 6)));
    assert_eq!(restored.get(call), arena.get(call));
}
