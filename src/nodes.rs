//! The interface model: a typed tree of declarations forming a package's
//! public surface.
//!
//! Three closed sums share the underlying node structs. [`VarNode`] covers
//! everything admissible in a type position, [`MemberNode`] everything
//! admissible at a module's top level, and [`TreeNode`] everything
//! addressable by a dotted path in a diff. Equality of var-nodes is
//! structural.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mod {
    pub name: String,
    pub members: BTreeMap<String, MemberNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Struct {
    pub name: String,
    pub fields: BTreeMap<String, Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    pub variants: BTreeMap<String, Variant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Func {
    pub name: String,
    pub params: BTreeMap<String, Param>,
    pub return_var_node: VarNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    pub name: String,
    pub var_node: VarNode,
}

// Field, Variant, and Param sit inside their parent's child map rather than
// inside a tagged enum, so each carries its own node_type tag on the wire.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "FieldWire", from = "FieldWire")]
pub struct Field {
    pub name: String,
    pub var_node: VarNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "VariantWire", from = "VariantWire")]
pub struct Variant {
    pub name: String,
    pub var_node: VarNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "ParamWire", from = "ParamWire")]
pub struct Param {
    pub name: String,
    pub var_node: VarNode,
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "lowercase")]
enum FieldWire {
    Field { name: String, var_node: VarNode },
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "lowercase")]
enum VariantWire {
    Variant { name: String, var_node: VarNode },
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "lowercase")]
enum ParamWire {
    Param { name: String, var_node: VarNode },
}

impl From<Field> for FieldWire {
    fn from(node: Field) -> Self {
        FieldWire::Field {
            name: node.name,
            var_node: node.var_node,
        }
    }
}

impl From<FieldWire> for Field {
    fn from(wire: FieldWire) -> Self {
        let FieldWire::Field { name, var_node } = wire;
        Field { name, var_node }
    }
}

impl From<Variant> for VariantWire {
    fn from(node: Variant) -> Self {
        VariantWire::Variant {
            name: node.name,
            var_node: node.var_node,
        }
    }
}

impl From<VariantWire> for Variant {
    fn from(wire: VariantWire) -> Self {
        let VariantWire::Variant { name, var_node } = wire;
        Variant { name, var_node }
    }
}

impl From<Param> for ParamWire {
    fn from(node: Param) -> Self {
        ParamWire::Param {
            name: node.name,
            var_node: node.var_node,
        }
    }
}

impl From<ParamWire> for Param {
    fn from(wire: ParamWire) -> Self {
        let ParamWire::Param { name, var_node } = wire;
        Param { name, var_node }
    }
}

/// Nodes admissible wherever a type is expected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "lowercase")]
pub enum VarNode {
    Bool,
    Int,
    Float,
    Str,
    Null,
    Maybe { var_node: Box<VarNode> },
    List { var_node: Box<VarNode> },
    Set { var_node: Box<VarNode> },
    Dict {
        key_var_node: Box<VarNode>,
        val_var_node: Box<VarNode>,
    },
    Tuple { var_nodes: Vec<VarNode> },
    Struct(Struct),
    Enum(Enum),
    Func(Box<Func>),
}

/// Declarations admissible at the top level of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node_type", rename_all = "lowercase")]
pub enum MemberNode {
    Mod(Mod),
    Struct(Struct),
    Enum(Enum),
    Func(Func),
    Const(Const),
}

impl MemberNode {
    pub fn name(&self) -> &str {
        match self {
            MemberNode::Mod(node) => &node.name,
            MemberNode::Struct(node) => &node.name,
            MemberNode::Enum(node) => &node.name,
            MemberNode::Func(node) => &node.name,
            MemberNode::Const(node) => &node.name,
        }
    }
}

/// Nodes addressable by a dotted path; the payload of a diff change record.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Mod(Mod),
    Struct(Struct),
    Enum(Enum),
    Func(Func),
    Const(Const),
    Field(Field),
    Variant(Variant),
    Param(Param),
}

impl TreeNode {
    pub fn kind(&self) -> &'static str {
        match self {
            TreeNode::Mod(_) => "Mod",
            TreeNode::Struct(_) => "Struct",
            TreeNode::Enum(_) => "Enum",
            TreeNode::Func(_) => "Func",
            TreeNode::Const(_) => "Const",
            TreeNode::Field(_) => "Field",
            TreeNode::Variant(_) => "Variant",
            TreeNode::Param(_) => "Param",
        }
    }
}

impl From<MemberNode> for TreeNode {
    fn from(member: MemberNode) -> Self {
        match member {
            MemberNode::Mod(node) => TreeNode::Mod(node),
            MemberNode::Struct(node) => TreeNode::Struct(node),
            MemberNode::Enum(node) => TreeNode::Enum(node),
            MemberNode::Func(node) => TreeNode::Func(node),
            MemberNode::Const(node) => TreeNode::Const(node),
        }
    }
}
