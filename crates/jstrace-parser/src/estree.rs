//! ESTree JSON import.
//!
//! Converts the JSON AST produced by ESTree parsers (acorn, esprima, espree,
//! meriyah) into a [`NodeArena`]. The constructs the analyzer inspects get
//! typed nodes; every other node object becomes [`Node::Other`] with its
//! node-valued fields as children, in JSON key order. That order matches the
//! source order for the common parsers, which keeps pre-order traversal
//! faithful.

use crate::parser::*;
use jstrace_common::limits::{IMPORT_STACK_RED_ZONE, IMPORT_STACK_SEGMENT, MAX_AST_DEPTH};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Error returned when an ESTree document cannot be imported.
#[derive(Debug)]
pub enum EstreeImportError {
    /// The input text is not valid JSON.
    InvalidJson(serde_json::Error),
    /// The root value is not a `Program` node.
    RootNotProgram { found: String },
    /// A value in node position is an object without a string `type`.
    MissingType { field: String },
    /// A field holds a value of the wrong JSON shape.
    UnexpectedValue { field: String, expected: &'static str },
    /// `VariableDeclaration.kind` is not a known keyword.
    InvalidVariableKind(String),
    /// Nesting exceeds `MAX_AST_DEPTH`.
    TooDeep { limit: u32 },
}

impl std::fmt::Display for EstreeImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstreeImportError::InvalidJson(err) => write!(f, "invalid ESTree JSON: {err}"),
            EstreeImportError::RootNotProgram { found } => {
                write!(f, "expected a Program node at the root, found {found}")
            }
            EstreeImportError::MissingType { field } => {
                write!(f, "node object in field `{field}` has no `type`")
            }
            EstreeImportError::UnexpectedValue { field, expected } => {
                write!(f, "field `{field}` should be {expected}")
            }
            EstreeImportError::InvalidVariableKind(kind) => {
                write!(f, "unknown variable declaration kind `{kind}`")
            }
            EstreeImportError::TooDeep { limit } => {
                write!(f, "AST nesting exceeds the limit of {limit} levels")
            }
        }
    }
}

impl std::error::Error for EstreeImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EstreeImportError::InvalidJson(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for EstreeImportError {
    fn from(err: serde_json::Error) -> Self {
        EstreeImportError::InvalidJson(err)
    }
}

/// Parse ESTree JSON text and import it.
///
/// JSON nesting is not limited while parsing; the depth bound is the AST
/// depth checked by the importer, so deep but legal programs are accepted
/// and overly deep ones fail with `TooDeep`.
pub fn import_program_str(text: &str) -> Result<(NodeArena, NodeIndex), EstreeImportError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    let result = match deserializer.end() {
        Ok(()) => import_program(&value),
        Err(err) => Err(err.into()),
    };
    drop_iteratively(value);
    result
}

/// Import an ESTree `Program` value. Returns the arena and the program index.
pub fn import_program(value: &Value) -> Result<(NodeArena, NodeIndex), EstreeImportError> {
    let found = match value {
        Value::Object(map) => match map.get("type").and_then(Value::as_str) {
            Some("Program") => None,
            Some(other) => Some(other.to_string()),
            None => Some("an object without `type`".to_string()),
        },
        other => Some(json_shape(other).to_string()),
    };
    if let Some(found) = found {
        return Err(EstreeImportError::RootNotProgram { found });
    }

    let mut importer = EstreeImporter::new();
    let program = importer.import_node(value, "root")?;
    debug!(
        nodes = importer.arena.len(),
        generic_kinds = ?importer.generic_kinds,
        "imported ESTree program"
    );
    Ok((importer.arena, program))
}

/// Keys that never hold child nodes.
const METADATA_KEYS: &[&str] = &["type", "loc", "range", "start", "end", "comments", "tokens"];

struct EstreeImporter {
    arena: NodeArena,
    depth: u32,
    /// Node types imported as `Other`, with counts.
    generic_kinds: FxHashMap<String, u32>,
}

impl EstreeImporter {
    fn new() -> EstreeImporter {
        EstreeImporter {
            arena: NodeArena::with_capacity(256),
            depth: 0,
            generic_kinds: FxHashMap::default(),
        }
    }

    /// Import the node held by `value`. `null` maps to `NONE`.
    ///
    /// Each level makes sure enough stack is left before descending, so the
    /// full `MAX_AST_DEPTH` fits on a small worker-thread stack.
    fn import_node(&mut self, value: &Value, field: &str) -> Result<NodeIndex, EstreeImportError> {
        stacker::maybe_grow(IMPORT_STACK_RED_ZONE, IMPORT_STACK_SEGMENT, || {
            self.import_node_object(value, field)
        })
    }

    fn import_node_object(
        &mut self,
        value: &Value,
        field: &str,
    ) -> Result<NodeIndex, EstreeImportError> {
        let map = match value {
            Value::Null => return Ok(NodeIndex::NONE),
            Value::Object(map) => map,
            _ => {
                return Err(EstreeImportError::UnexpectedValue {
                    field: field.to_string(),
                    expected: "a node object or null",
                });
            }
        };
        let Some(type_name) = map.get("type").and_then(Value::as_str) else {
            return Err(EstreeImportError::MissingType {
                field: field.to_string(),
            });
        };

        self.depth += 1;
        if self.depth > MAX_AST_DEPTH {
            return Err(EstreeImportError::TooDeep {
                limit: MAX_AST_DEPTH,
            });
        }
        let result = self.import_object(type_name, map);
        self.depth -= 1;

        let index = result?;
        if let Some((pos, end)) = span_of(map) {
            self.arena.set_span(index, pos, end);
        }
        Ok(index)
    }

    fn import_object(
        &mut self,
        type_name: &str,
        map: &Map<String, Value>,
    ) -> Result<NodeIndex, EstreeImportError> {
        trace!(type_name, depth = self.depth, "import node");
        let node = match type_name {
            "Program" => Node::Program(SourceFileData {
                statements: self.import_list(map, "body")?,
            }),
            "BlockStatement" | "StaticBlock" => Node::Block(BlockData {
                statements: self.import_list(map, "body")?,
            }),
            "VariableDeclaration" => {
                let keyword = map.get("kind").and_then(Value::as_str).unwrap_or("var");
                let kind = VariableKind::from_keyword(keyword)
                    .ok_or_else(|| EstreeImportError::InvalidVariableKind(keyword.to_string()))?;
                Node::VariableStatement(VariableData {
                    kind,
                    declarations: self.import_list(map, "declarations")?,
                })
            }
            "VariableDeclarator" => Node::VariableDeclaration(VariableDeclarationData {
                name: self.import_field(map, "id")?,
                initializer: self.import_field(map, "init")?,
            }),
            "Identifier" => {
                let name = map.get("name").and_then(Value::as_str).ok_or_else(|| {
                    EstreeImportError::UnexpectedValue {
                        field: "name".to_string(),
                        expected: "a string",
                    }
                })?;
                Node::Identifier(IdentifierData {
                    escaped_text: name.to_string(),
                })
            }
            "FunctionDeclaration" => Node::FunctionDeclaration(self.import_function(map)?),
            "FunctionExpression" => Node::FunctionExpression(self.import_function(map)?),
            "ArrowFunctionExpression" => Node::ArrowFunction(self.import_function(map)?),
            "CallExpression" => Node::CallExpression(CallExprData {
                expression: self.import_field(map, "callee")?,
                arguments: self.import_list(map, "arguments")?,
                optional: bool_field(map, "optional"),
            }),
            "MemberExpression" => Node::PropertyAccess(AccessExprData {
                expression: self.import_field(map, "object")?,
                name_or_argument: self.import_field(map, "property")?,
                computed: bool_field(map, "computed"),
            }),
            "ExpressionStatement" => Node::ExpressionStatement(ExprStatementData {
                expression: self.import_field(map, "expression")?,
            }),
            "ReturnStatement" => Node::ReturnStatement(ReturnData {
                expression: self.import_field(map, "argument")?,
            }),
            "Literal" => Node::Literal(LiteralData {
                text: literal_text(map),
            }),
            _ => {
                *self.generic_kinds.entry(type_name.to_string()).or_default() += 1;
                Node::Other(OtherData {
                    type_name: type_name.to_string(),
                    children: self.import_generic_children(map)?,
                })
            }
        };
        Ok(self.arena.add_node(node))
    }

    fn import_function(&mut self, map: &Map<String, Value>) -> Result<FunctionData, EstreeImportError> {
        Ok(FunctionData {
            name: self.import_field(map, "id")?,
            parameters: self.import_list(map, "params")?,
            body: self.import_field(map, "body")?,
            is_async: bool_field(map, "async"),
            asterisk: bool_field(map, "generator"),
        })
    }

    /// Import an optional single-node field. A missing key is treated as `null`.
    fn import_field(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
    ) -> Result<NodeIndex, EstreeImportError> {
        match map.get(key) {
            Some(value) => self.import_node(value, key),
            None => Ok(NodeIndex::NONE),
        }
    }

    /// Import a node array field. `null` holes (array elisions) are dropped.
    fn import_list(&mut self, map: &Map<String, Value>, key: &str) -> Result<NodeList, EstreeImportError> {
        let items = match map.get(key) {
            None | Some(Value::Null) => return Ok(NodeList::new()),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(EstreeImportError::UnexpectedValue {
                    field: key.to_string(),
                    expected: "an array of nodes",
                });
            }
        };
        let mut list = NodeList::with_capacity(items.len());
        for item in items {
            let index = self.import_node(item, key)?;
            if index.is_some() {
                list.push(index);
            }
        }
        Ok(list)
    }

    /// Children of a node without a dedicated variant: every field holding a
    /// node object or an array of node objects, in key order.
    fn import_generic_children(&mut self, map: &Map<String, Value>) -> Result<NodeList, EstreeImportError> {
        let mut children = NodeList::new();
        for (key, value) in map {
            if METADATA_KEYS.contains(&key.as_str()) {
                continue;
            }
            match value {
                Value::Object(_) if is_node_object(value) => {
                    children.push(self.import_node(value, key)?);
                }
                Value::Array(items) => {
                    for item in items.iter().filter(|item| is_node_object(item)) {
                        children.push(self.import_node(item, key)?);
                    }
                }
                _ => {}
            }
        }
        Ok(children)
    }
}

/// Drop a parsed document with an explicit work list. The derived drop of a
/// `Value` recurses once per nesting level.
fn drop_iteratively(value: Value) {
    let mut pending = vec![value];
    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items),
            Value::Object(map) => pending.extend(map.into_iter().map(|(_, value)| value)),
            _ => {}
        }
    }
}

fn is_node_object(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|map| map.get("type"))
        .is_some_and(Value::is_string)
}

fn bool_field(map: &Map<String, Value>, key: &str) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Acorn-style `start`/`end`, falling back to esprima-style `range`.
fn span_of(map: &Map<String, Value>) -> Option<(u32, u32)> {
    let offset = |value: &Value| value.as_u64().and_then(|v| u32::try_from(v).ok());
    if let (Some(start), Some(end)) = (map.get("start"), map.get("end")) {
        if let (Some(pos), Some(end)) = (offset(start), offset(end)) {
            return Some((pos, end));
        }
    }
    match map.get("range")?.as_array()?.as_slice() {
        [start, end] => Some((offset(start)?, offset(end)?)),
        _ => None,
    }
}

fn literal_text(map: &Map<String, Value>) -> String {
    if let Some(raw) = map.get("raw").and_then(Value::as_str) {
        return raw.to_string();
    }
    match map.get("value") {
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn json_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
