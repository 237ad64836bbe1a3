//! Structural diffing of two interface models and classification of every
//! change as breaking or non-breaking.
//!
//! The walk is deterministic: at every level the union of child names is
//! visited in lexicographic order, so a given pair of packages always
//! produces the same change sequence.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::InternalError;
use crate::nodes::{Const, Enum, Func, MemberNode, Struct, TreeNode, VarNode};
use crate::package::Package;

/// A dotted path from the package name down to the changed node.
pub type TreePath = Vec<String>;

#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Addition {
        tree_node: TreeNode,
        path: TreePath,
    },
    Removal {
        tree_node: TreeNode,
        path: TreePath,
    },
    VarNodeChange {
        tree_node: TreeNode,
        old_var_node: VarNode,
        new_var_node: VarNode,
        path: TreePath,
    },
    TreeNodeChange {
        old_tree_node: TreeNode,
        new_tree_node: TreeNode,
        path: TreePath,
    },
}

impl Change {
    /// Additions are the only change consumers can absorb without edits.
    pub fn is_breaking(&self) -> bool {
        !matches!(self, Change::Addition { .. })
    }

    pub fn path(&self) -> &[String] {
        match self {
            Change::Addition { path, .. }
            | Change::Removal { path, .. }
            | Change::VarNodeChange { path, .. }
            | Change::TreeNodeChange { path, .. } => path,
        }
    }
}

#[derive(Debug, Default)]
pub struct Differ;

impl Differ {
    pub fn new() -> Self {
        Self
    }

    /// All structural changes from `old` to `new`, in lexicographic path
    /// order. Both packages must describe the same name.
    pub fn diff(&self, old: &Package, new: &Package) -> Result<Vec<Change>, InternalError> {
        if old.info.name != new.info.name {
            return Err(InternalError(format!(
                "Cannot diff package {} against package {}",
                old.info.name, new.info.name
            )));
        }
        let mut changes = Vec::new();
        let path = vec![old.info.name.clone()];
        self.diff_members(old.members.nodes(), new.members.nodes(), &path, &mut changes);
        Ok(changes)
    }

    fn diff_members(
        &self,
        old: &BTreeMap<String, MemberNode>,
        new: &BTreeMap<String, MemberNode>,
        path: &[String],
        changes: &mut Vec<Change>,
    ) {
        for name in union_names(old, new) {
            let member_path = child_path(path, name);
            match (old.get(name), new.get(name)) {
                (Some(old_member), Some(new_member)) => {
                    self.diff_member_node(old_member, new_member, &member_path, changes);
                }
                (Some(old_member), None) => changes.push(Change::Removal {
                    tree_node: old_member.clone().into(),
                    path: member_path,
                }),
                (None, Some(new_member)) => changes.push(Change::Addition {
                    tree_node: new_member.clone().into(),
                    path: member_path,
                }),
                (None, None) => unreachable!("name drawn from the union of both maps"),
            }
        }
    }

    fn diff_member_node(
        &self,
        old: &MemberNode,
        new: &MemberNode,
        path: &[String],
        changes: &mut Vec<Change>,
    ) {
        match (old, new) {
            (MemberNode::Mod(old_mod), MemberNode::Mod(new_mod)) => {
                self.diff_members(&old_mod.members, &new_mod.members, path, changes);
            }
            (MemberNode::Struct(old_struct), MemberNode::Struct(new_struct)) => {
                self.diff_struct(old_struct, new_struct, path, changes);
            }
            (MemberNode::Enum(old_enum), MemberNode::Enum(new_enum)) => {
                self.diff_enum(old_enum, new_enum, path, changes);
            }
            (MemberNode::Func(old_func), MemberNode::Func(new_func)) => {
                self.diff_func(old_func, new_func, path, changes);
            }
            (MemberNode::Const(old_const), MemberNode::Const(new_const)) => {
                self.diff_const(old_const, new_const, path, changes);
            }
            _ => changes.push(Change::TreeNodeChange {
                old_tree_node: old.clone().into(),
                new_tree_node: new.clone().into(),
                path: path.to_vec(),
            }),
        }
    }

    fn diff_struct(&self, old: &Struct, new: &Struct, path: &[String], changes: &mut Vec<Change>) {
        for name in union_names(&old.fields, &new.fields) {
            let field_path = child_path(path, name);
            match (old.fields.get(name), new.fields.get(name)) {
                (Some(old_field), Some(new_field)) => self.diff_var_node(
                    TreeNode::Field(old_field.clone()),
                    &old_field.var_node,
                    &new_field.var_node,
                    &field_path,
                    changes,
                ),
                (Some(old_field), None) => changes.push(Change::Removal {
                    tree_node: TreeNode::Field(old_field.clone()),
                    path: field_path,
                }),
                (None, Some(new_field)) => changes.push(Change::Addition {
                    tree_node: TreeNode::Field(new_field.clone()),
                    path: field_path,
                }),
                (None, None) => unreachable!("name drawn from the union of both maps"),
            }
        }
    }

    fn diff_enum(&self, old: &Enum, new: &Enum, path: &[String], changes: &mut Vec<Change>) {
        for name in union_names(&old.variants, &new.variants) {
            let variant_path = child_path(path, name);
            match (old.variants.get(name), new.variants.get(name)) {
                (Some(old_variant), Some(new_variant)) => self.diff_var_node(
                    TreeNode::Variant(old_variant.clone()),
                    &old_variant.var_node,
                    &new_variant.var_node,
                    &variant_path,
                    changes,
                ),
                (Some(old_variant), None) => changes.push(Change::Removal {
                    tree_node: TreeNode::Variant(old_variant.clone()),
                    path: variant_path,
                }),
                (None, Some(new_variant)) => changes.push(Change::Addition {
                    tree_node: TreeNode::Variant(new_variant.clone()),
                    path: variant_path,
                }),
                (None, None) => unreachable!("name drawn from the union of both maps"),
            }
        }
    }

    fn diff_func(&self, old: &Func, new: &Func, path: &[String], changes: &mut Vec<Change>) {
        self.diff_var_node(
            TreeNode::Func(old.clone()),
            &old.return_var_node,
            &new.return_var_node,
            path,
            changes,
        );
        for name in union_names(&old.params, &new.params) {
            let param_path = child_path(path, name);
            match (old.params.get(name), new.params.get(name)) {
                (Some(old_param), Some(new_param)) => self.diff_var_node(
                    TreeNode::Param(old_param.clone()),
                    &old_param.var_node,
                    &new_param.var_node,
                    &param_path,
                    changes,
                ),
                (Some(old_param), None) => changes.push(Change::Removal {
                    tree_node: TreeNode::Param(old_param.clone()),
                    path: param_path,
                }),
                (None, Some(new_param)) => changes.push(Change::Addition {
                    tree_node: TreeNode::Param(new_param.clone()),
                    path: param_path,
                }),
                (None, None) => unreachable!("name drawn from the union of both maps"),
            }
        }
    }

    fn diff_const(&self, old: &Const, new: &Const, path: &[String], changes: &mut Vec<Change>) {
        self.diff_var_node(
            TreeNode::Const(old.clone()),
            &old.var_node,
            &new.var_node,
            path,
            changes,
        );
    }

    /// Compare two nodes in a type position. Composites that are also
    /// declarations are entered through their declaration walk so nested
    /// fine-grained changes surface instead of collapsing into a single
    /// var-node change.
    fn diff_var_node(
        &self,
        tree_node: TreeNode,
        old: &VarNode,
        new: &VarNode,
        path: &[String],
        changes: &mut Vec<Change>,
    ) {
        match (old, new) {
            (VarNode::Struct(old_struct), VarNode::Struct(new_struct)) => {
                let struct_path = child_path(path, &old_struct.name);
                self.diff_struct(old_struct, new_struct, &struct_path, changes);
            }
            (VarNode::Enum(old_enum), VarNode::Enum(new_enum)) => {
                let enum_path = child_path(path, &old_enum.name);
                self.diff_enum(old_enum, new_enum, &enum_path, changes);
            }
            (VarNode::Func(old_func), VarNode::Func(new_func)) => {
                let func_path = child_path(path, &old_func.name);
                self.diff_func(old_func, new_func, &func_path, changes);
            }
            _ => {
                if old != new {
                    changes.push(Change::VarNodeChange {
                        tree_node,
                        old_var_node: old.clone(),
                        new_var_node: new.clone(),
                        path: path.to_vec(),
                    });
                }
            }
        }
    }
}

fn union_names<'a, V>(
    old: &'a BTreeMap<String, V>,
    new: &'a BTreeMap<String, V>,
) -> impl Iterator<Item = &'a str> {
    old.keys()
        .chain(new.keys())
        .map(String::as_str)
        .collect::<BTreeSet<&str>>()
        .into_iter()
}

fn child_path(path: &[String], name: &str) -> TreePath {
    let mut child = path.to_vec();
    child.push(name.to_string());
    child
}
