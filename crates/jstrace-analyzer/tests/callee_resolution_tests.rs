//! Tests for function-expression callee resolution.
use jstrace_analyzer::{
    CalleeData, CalleeDataExtractor, FunctionExpressionCalleeDataExtractor,
    find_bound_function_expression,
};
use jstrace_parser::parser::{NodeArena, NodeIndex, VariableKind};

// =============================================================================
// Fixture helpers
// =============================================================================

/// `var <name> = function () { <statements> };` returning (statement, function, body).
fn var_function(
    arena: &mut NodeArena,
    name: &str,
    statements: Vec<NodeIndex>,
) -> (NodeIndex, NodeIndex, NodeIndex) {
    let body = arena.add_block(statements);
    let function = arena.add_function_expression(NodeIndex::NONE, vec![], body);
    let target = arena.add_identifier(name);
    let declaration = arena.add_variable_declaration(target, function);
    let statement = arena.add_variable_statement(VariableKind::Var, vec![declaration]);
    (statement, function, body)
}

/// `<name>();` returning (statement, callee identifier).
fn call_statement(arena: &mut NodeArena, name: &str) -> (NodeIndex, NodeIndex) {
    let callee = arena.add_identifier(name);
    let call = arena.add_call_expression(callee, vec![]);
    (arena.add_expression_statement(call), callee)
}

/// `function <name>() { <statements> }` in a program, returning (program, body).
fn wrap_in_outer(arena: &mut NodeArena, statements: Vec<NodeIndex>) -> (NodeIndex, NodeIndex) {
    let body = arena.add_block(statements);
    let name = arena.add_identifier("outer");
    let outer = arena.add_function_declaration(name, vec![], body);
    (arena.add_program(vec![outer]), body)
}

fn statements_of(arena: &NodeArena, block: NodeIndex) -> Vec<NodeIndex> {
    arena
        .block_statements(block)
        .expect("block has statements")
        .to_vec()
}

// =============================================================================
// Name references
// =============================================================================

#[test]
fn test_resolves_named_function_expression_end_to_end() {
    // function outer() { var f = function() { return 1; }; f(); }
    let mut arena = NodeArena::new();
    let one = arena.add_literal("1");
    let ret = arena.add_return_statement(one);
    let (var_f, _, f_body) = var_function(&mut arena, "f", vec![ret]);
    let (call_f, callee) = call_statement(&mut arena, "f");
    let (_, outer_body) = wrap_in_outer(&mut arena, vec![var_f, call_f]);

    let scope_body = statements_of(&arena, outer_body);
    let result = FunctionExpressionCalleeDataExtractor.extract(&arena, &scope_body, callee);

    assert_eq!(result, Some(CalleeData::new(f_body, Some("f".to_string()))));
    assert_eq!(arena.block_statements(f_body), Some(&[ret][..]));
}

#[test]
fn test_unbound_name_resolves_to_nothing() {
    let mut arena = NodeArena::new();
    let (var_f, _, _) = var_function(&mut arena, "f", vec![]);
    let (call_g, callee) = call_statement(&mut arena, "g");
    let (_, outer_body) = wrap_in_outer(&mut arena, vec![var_f, call_g]);

    let scope_body = statements_of(&arena, outer_body);
    assert_eq!(
        FunctionExpressionCalleeDataExtractor.extract(&arena, &scope_body, callee),
        None
    );
}

#[test]
fn test_binding_to_non_function_values_is_ignored() {
    // var f = 1; var g = () => {}; function h() {} f(); g(); h();
    let mut arena = NodeArena::new();
    let f = arena.add_identifier("f");
    let one = arena.add_literal("1");
    let f_decl = arena.add_variable_declaration(f, one);
    let g = arena.add_identifier("g");
    let arrow_body = arena.add_block(vec![]);
    let arrow = arena.add_arrow_function(vec![], arrow_body);
    let g_decl = arena.add_variable_declaration(g, arrow);
    let var_stmt = arena.add_variable_statement(VariableKind::Let, vec![f_decl, g_decl]);
    let h = arena.add_identifier("h");
    let h_body = arena.add_block(vec![]);
    let h_decl = arena.add_function_declaration(h, vec![], h_body);
    let (call_f, f_callee) = call_statement(&mut arena, "f");
    let (call_g, g_callee) = call_statement(&mut arena, "g");
    let (call_h, h_callee) = call_statement(&mut arena, "h");
    let (_, outer_body) = wrap_in_outer(&mut arena, vec![var_stmt, h_decl, call_f, call_g, call_h]);

    let scope_body = statements_of(&arena, outer_body);
    for callee in [f_callee, g_callee, h_callee] {
        assert_eq!(
            FunctionExpressionCalleeDataExtractor.extract(&arena, &scope_body, callee),
            None,
            "{:?} should not resolve",
            arena.identifier_text(callee)
        );
    }
}

#[test]
fn test_assignment_is_not_a_binding() {
    // f = function () {}; f();
    let mut arena = NodeArena::new();
    let target = arena.add_identifier("f");
    let body = arena.add_block(vec![]);
    let function = arena.add_function_expression(NodeIndex::NONE, vec![], body);
    let assignment = arena.add_other("AssignmentExpression", vec![target, function]);
    let assignment_stmt = arena.add_expression_statement(assignment);
    let (call_f, callee) = call_statement(&mut arena, "f");
    let program = arena.add_program(vec![assignment_stmt, call_f]);

    let scope_body = statements_of(&arena, program);
    assert_eq!(
        FunctionExpressionCalleeDataExtractor.extract(&arena, &scope_body, callee),
        None
    );
}

#[test]
fn test_search_stays_in_the_scope_of_the_first_statement() {
    // var f = function () {}; function outer() { f(); }
    let mut arena = NodeArena::new();
    let (var_f, _, _) = var_function(&mut arena, "f", vec![]);
    let (call_f, callee) = call_statement(&mut arena, "f");
    let outer_body = arena.add_block(vec![call_f]);
    let outer_name = arena.add_identifier("outer");
    let outer = arena.add_function_declaration(outer_name, vec![], outer_body);
    let program = arena.add_program(vec![var_f, outer]);

    // Searching from the function body does not reach the program-level binding.
    let scope_body = statements_of(&arena, outer_body);
    assert_eq!(
        FunctionExpressionCalleeDataExtractor.extract(&arena, &scope_body, callee),
        None
    );

    // Searching from the program body does.
    let program_body = statements_of(&arena, program);
    assert!(
        FunctionExpressionCalleeDataExtractor
            .extract(&arena, &program_body, callee)
            .is_some()
    );
}

#[test]
fn test_name_reference_with_empty_scope_body_resolves_to_nothing() {
    let mut arena = NodeArena::new();
    let (var_f, _, _) = var_function(&mut arena, "f", vec![]);
    let (call_f, callee) = call_statement(&mut arena, "f");
    arena.add_program(vec![var_f, call_f]);

    assert_eq!(FunctionExpressionCalleeDataExtractor.extract(&arena, &[], callee), None);
}

#[test]
fn test_first_binding_in_pre_order_wins() {
    // function outer() {
    //     var g = function () { var f = function () { return "nested"; }; };
    //     var f = function () { return "outer"; };
    //     f();
    // }
    //
    // Pre-order over outer's body visits:
    //   Block(outer) > VariableStatement(g) > VariableDeclarator(g) > Identifier(g)
    //   > FunctionExpression(g) > Block(g) > VariableStatement(f) > VariableDeclarator(f)
    //   > Identifier(f) > FunctionExpression(nested f)   <- first match, walk stops
    //
    // The lexically correct target of `f()` is the second binding, but the
    // nested one is reached first.
    let mut arena = NodeArena::new();
    let nested_text = arena.add_literal("\"nested\"");
    let nested_ret = arena.add_return_statement(nested_text);
    let (nested_var_f, _, nested_body) = var_function(&mut arena, "f", vec![nested_ret]);
    let (var_g, _, _) = var_function(&mut arena, "g", vec![nested_var_f]);
    let outer_text = arena.add_literal("\"outer\"");
    let outer_ret = arena.add_return_statement(outer_text);
    let (var_f, _, outer_f_body) = var_function(&mut arena, "f", vec![outer_ret]);
    let (call_f, callee) = call_statement(&mut arena, "f");
    let (_, outer_body) = wrap_in_outer(&mut arena, vec![var_g, var_f, call_f]);

    let scope_body = statements_of(&arena, outer_body);
    let result = FunctionExpressionCalleeDataExtractor
        .extract(&arena, &scope_body, callee)
        .expect("f resolves");

    assert_eq!(result.body, nested_body);
    assert_ne!(result.body, outer_f_body);
    assert_eq!(
        find_bound_function_expression(&arena, outer_body, "f"),
        Some(nested_body)
    );
}

#[test]
fn test_find_bound_function_expression_stops_at_first_sibling() {
    // { var f = function () { /* A */ }; var f = function () { /* B */ }; }
    let mut arena = NodeArena::new();
    let a_marker = arena.add_literal("\"A\"");
    let a_stmt = arena.add_expression_statement(a_marker);
    let (first, _, first_body) = var_function(&mut arena, "f", vec![a_stmt]);
    let (second, _, second_body) = var_function(&mut arena, "f", vec![]);
    let scope = arena.add_block(vec![first, second]);

    let found = find_bound_function_expression(&arena, scope, "f");
    assert_eq!(found, Some(first_body));
    assert_ne!(found, Some(second_body));
    assert_eq!(find_bound_function_expression(&arena, scope, "missing"), None);
}

// =============================================================================
// Function literals
// =============================================================================

#[test]
fn test_anonymous_function_expression_passes_through() {
    let mut arena = NodeArena::new();
    let body = arena.add_block(vec![]);
    let function = arena.add_function_expression(NodeIndex::NONE, vec![], body);
    let call = arena.add_call_expression(function, vec![]);
    let stmt = arena.add_expression_statement(call);
    let program = arena.add_program(vec![stmt]);

    let program_body = statements_of(&arena, program);
    let expected = Some(CalleeData::new(body, None));
    assert_eq!(
        FunctionExpressionCalleeDataExtractor.extract(&arena, &program_body, function),
        expected
    );
    // The scope body plays no part for literals.
    assert_eq!(
        FunctionExpressionCalleeDataExtractor.extract(&arena, &[], function),
        expected
    );
}

#[test]
fn test_named_function_expression_keeps_its_name() {
    let mut arena = NodeArena::new();
    let name = arena.add_identifier("loop");
    let body = arena.add_block(vec![]);
    let function = arena.add_function_expression(name, vec![], body);

    assert_eq!(
        FunctionExpressionCalleeDataExtractor.extract(&arena, &[], function),
        Some(CalleeData::new(body, Some("loop".to_string())))
    );
}

// =============================================================================
// Unsupported shapes
// =============================================================================

#[test]
fn test_unsupported_callee_shapes_resolve_to_nothing() {
    let mut arena = NodeArena::new();
    let (var_f, _, _) = var_function(&mut arena, "f", vec![]);

    // obj.f
    let object = arena.add_identifier("obj");
    let property = arena.add_identifier("f");
    let member = arena.add_property_access(object, property);
    // obj["f"]
    let object2 = arena.add_identifier("obj");
    let key = arena.add_literal("\"f\"");
    let element = arena.add_element_access(object2, key);
    // f()()
    let inner_callee = arena.add_identifier("f");
    let inner_call = arena.add_call_expression(inner_callee, vec![]);
    // (() => {})()
    let arrow_body = arena.add_block(vec![]);
    let arrow = arena.add_arrow_function(vec![], arrow_body);

    let program = arena.add_program(vec![var_f]);
    let scope_body = statements_of(&arena, program);

    for callee in [member, element, inner_call, arrow, NodeIndex::NONE] {
        assert_eq!(
            FunctionExpressionCalleeDataExtractor.extract(&arena, &scope_body, callee),
            None,
            "callee {callee} should be unsupported"
        );
    }
}

// =============================================================================
// Determinism and serialization
// =============================================================================

#[test]
fn test_repeated_resolution_is_identical() {
    let mut arena = NodeArena::new();
    let (var_f, _, _) = var_function(&mut arena, "f", vec![]);
    let (call_f, callee) = call_statement(&mut arena, "f");
    let (_, outer_body) = wrap_in_outer(&mut arena, vec![var_f, call_f]);
    let scope_body = statements_of(&arena, outer_body);

    let extractor = FunctionExpressionCalleeDataExtractor::new();
    let first = extractor.extract(&arena, &scope_body, callee);
    let second = extractor.extract(&arena, &scope_body, callee);
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_callee_data_serializes_to_json() {
    let data = CalleeData::new(NodeIndex(7), Some("f".to_string()));
    let json = serde_json::to_value(&data).expect("serialize");
    assert_eq!(json, serde_json::json!({ "body": 7, "name": "f" }));

    let anonymous = CalleeData::new(NodeIndex(3), None);
    let json = serde_json::to_value(&anonymous).expect("serialize");
    assert_eq!(json, serde_json::json!({ "body": 3, "name": null }));
}
