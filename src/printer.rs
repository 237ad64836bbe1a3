//! Styled terminal output. Everything the user sees goes through here;
//! the cores raise errors and never print.

use std::collections::BTreeMap;

use console::style;
use dialoguer::Confirm;

use crate::differ::Change;
use crate::index::Index;
use crate::nodes::{Enum, Func, MemberNode, Struct, VarNode};
use crate::package::{Lock, Package};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Info,
    Debug,
}

#[derive(Debug)]
pub struct Printer {
    verbosity: Verbosity,
}

impl Printer {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn print_message(&self, msg: &str) {
        println!("{}", style(msg).bold());
    }

    pub fn print_success(&self, msg: &str) {
        println!("{}", style(msg).green().bold());
    }

    pub fn print_warning(&self, msg: &str) {
        println!("{}", style(msg).red().bold());
    }

    pub fn print_error(&self, msg: &str) {
        println!("{}", style(msg).red().bold());
    }

    pub fn print_info(&self, msg: &str) {
        if self.verbosity >= Verbosity::Info {
            println!("{}", style(msg).dim());
        }
    }

    pub fn print_debug(&self, msg: &str) {
        if self.verbosity >= Verbosity::Debug {
            println!("{}", style(msg).dim());
        }
    }

    pub fn confirm(&self, prompt: &str) -> Result<bool, dialoguer::Error> {
        Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()
    }

    pub fn print_package(
        &self,
        package: &Package,
        show_deps: bool,
        show_lock: bool,
        show_members: bool,
    ) {
        let info = &package.info;
        println!("{} {}", style("Name").bold(), info.name);
        if let Some(description) = &info.description {
            println!("{} {}", style("Description").bold(), description);
        }
        println!("{} {}", style("Version").bold(), info.version);

        if show_deps {
            println!();
            println!("{}", style("Dependencies").bold());
            if package.dependencies.is_empty() {
                println!("└── [none]");
            } else {
                let lines: Vec<String> = package
                    .dependencies
                    .iter()
                    .map(|dependency| dependency.to_string())
                    .collect();
                self.print_leaves(&lines);
            }
        }

        if show_lock {
            if let Some(lock) = &package.lock {
                println!();
                println!("{}", style("Locked dependencies").bold());
                if lock.is_empty() {
                    println!("└── [none]");
                } else {
                    let lines: Vec<String> = lock
                        .iter()
                        .map(|pin| match lock.parent_of(&pin.name) {
                            Some(parent) => format!("{pin} (via {parent})"),
                            None => pin.to_string(),
                        })
                        .collect();
                    self.print_leaves(&lines);
                }
            }
        }

        if show_members {
            println!();
            println!("{}", style("Interface").bold());
            if package.members.is_empty() {
                println!("└── [empty]");
            } else {
                let mut lines = Vec::new();
                render_members(package.members.nodes(), "", &mut lines);
                for line in lines {
                    println!("{line}");
                }
            }
        }
    }

    pub fn print_index(&self, index: &Index, package_name: Option<&str>, show_versions: bool) {
        println!("{}", style(&index.name).bold());
        let namespaces: Vec<_> = index
            .namespaces
            .values()
            .filter(|namespace| package_name.is_none_or(|name| namespace.name == name))
            .collect();
        if namespaces.is_empty() {
            println!("└── [empty]");
            return;
        }
        let count = namespaces.len();
        for (position, namespace) in namespaces.iter().enumerate() {
            let last = position + 1 == count;
            println!("{}{}", connector(last), namespace.name);
            if !show_versions {
                continue;
            }
            let child_prefix = child_prefix(last);
            let packages: Vec<&Package> = namespace.packages.values().collect();
            let package_count = packages.len();
            for (i, package) in packages.iter().enumerate() {
                let leaf_last = i + 1 == package_count;
                println!("{child_prefix}{}{package}", connector(leaf_last));
            }
        }
    }

    pub fn print_lock_diff(&self, old: Option<&Lock>, new: &Lock) {
        // A pin whose version moved shows up as a removal plus an addition.
        let additions: Vec<_> = new
            .iter()
            .filter(|pin| old.is_none_or(|lock| lock.get(&pin.name) != Some(*pin)))
            .collect();
        let removals: Vec<_> = old
            .map(|lock| {
                lock.iter()
                    .filter(|pin| new.get(&pin.name) != Some(*pin))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        if additions.is_empty() && removals.is_empty() {
            self.print_success("Project lock is up to date");
            return;
        }
        self.print_success(&format!(
            "Project lock updated with {} and {}",
            count_noun(additions.len(), "addition", "additions"),
            count_noun(removals.len(), "removal", "removals"),
        ));
        for pin in additions {
            println!("{}", style(format!("+ {pin}")).green());
        }
        for pin in removals {
            println!("{}", style(format!("- {pin}")).red());
        }
    }

    pub fn print_breaks(&self, breaks: &[&Change], reference: &Package) {
        self.print_error(&format!(
            "Found {} compared to {}=={}",
            count_noun(breaks.len(), "compatibility break", "compatibility breaks"),
            reference.info.name,
            reference.info.version,
        ));
        for change in breaks {
            self.print_change(change);
        }
    }

    pub fn print_changes(&self, changes: &[Change], reference: &Package) {
        self.print_message(&format!(
            "Found {} compared to {}=={}",
            count_noun(changes.len(), "change", "changes"),
            reference.info.name,
            reference.info.version,
        ));
        for change in changes {
            self.print_change(change);
        }
    }

    pub fn print_change(&self, change: &Change) {
        let path = change.path().join(".");
        match change {
            Change::Addition { tree_node, .. } => {
                let line = format!(
                    "+ Added {} '{}'",
                    tree_node.kind().to_lowercase(),
                    path
                );
                println!("{}", style(line).green());
            }
            Change::Removal { tree_node, .. } => {
                let line = format!(
                    "- Removed {} '{}'",
                    tree_node.kind().to_lowercase(),
                    path
                );
                println!("{}", style(line).red());
            }
            Change::VarNodeChange {
                tree_node,
                old_var_node,
                new_var_node,
                ..
            } => {
                let line = format!(
                    "~ Changed the type of {} '{}' from {} to {}",
                    tree_node.kind().to_lowercase(),
                    path,
                    var_label(old_var_node),
                    var_label(new_var_node),
                );
                println!("{}", style(line).yellow());
            }
            Change::TreeNodeChange {
                old_tree_node,
                new_tree_node,
                ..
            } => {
                let line = format!(
                    "~ Changed '{}' from {} to {}",
                    path,
                    old_tree_node.kind().to_lowercase(),
                    new_tree_node.kind().to_lowercase(),
                );
                println!("{}", style(line).yellow());
            }
        }
    }

    fn print_leaves(&self, lines: &[String]) {
        let count = lines.len();
        for (position, line) in lines.iter().enumerate() {
            println!("{}{line}", connector(position + 1 == count));
        }
    }
}

fn connector(last: bool) -> &'static str {
    if last { "└── " } else { "├── " }
}

fn child_prefix(last: bool) -> &'static str {
    if last { "    " } else { "│   " }
}

pub fn count_noun(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn render_members(nodes: &BTreeMap<String, MemberNode>, prefix: &str, out: &mut Vec<String>) {
    let count = nodes.len();
    for (position, node) in nodes.values().enumerate() {
        render_member(node, prefix, position + 1 == count, out);
    }
}

fn render_member(node: &MemberNode, prefix: &str, last: bool, out: &mut Vec<String>) {
    let head = format!("{prefix}{}", connector(last));
    let nested = format!("{prefix}{}", child_prefix(last));
    match node {
        MemberNode::Mod(module) => {
            out.push(format!("{head}{}", style(&module.name).magenta()));
            render_members(&module.members, &nested, out);
        }
        MemberNode::Struct(node) => {
            out.push(format!("{head}{}", node.name));
            let labels: Vec<String> = node
                .fields
                .values()
                .map(|f| format!("{}: {}", f.name, var_label(&f.var_node)))
                .collect();
            render_leaves(&labels, &nested, out);
        }
        MemberNode::Enum(node) => {
            out.push(format!("{head}{}", node.name));
            let labels: Vec<String> = node
                .variants
                .values()
                .map(|v| format!("{}({})", v.name, var_label(&v.var_node)))
                .collect();
            render_leaves(&labels, &nested, out);
        }
        MemberNode::Func(node) => out.push(format!("{head}{}", func_signature(node))),
        MemberNode::Const(node) => out.push(format!(
            "{head}{}: {}",
            node.name,
            var_label(&node.var_node)
        )),
    }
}

fn render_leaves(labels: &[String], prefix: &str, out: &mut Vec<String>) {
    let count = labels.len();
    for (position, label) in labels.iter().enumerate() {
        out.push(format!("{prefix}{}{label}", connector(position + 1 == count)));
    }
}

fn func_signature(func: &Func) -> String {
    let params: Vec<String> = func
        .params
        .values()
        .map(|param| format!("{}: {}", param.name, var_label(&param.var_node)))
        .collect();
    format!(
        "{}({}) -> {}",
        func.name,
        params.join(", "),
        var_label(&func.return_var_node)
    )
}

/// A compact textual form for a node in a type position.
pub fn var_label(node: &VarNode) -> String {
    match node {
        VarNode::Bool => "Bool".to_string(),
        VarNode::Int => "Int".to_string(),
        VarNode::Float => "Float".to_string(),
        VarNode::Str => "Str".to_string(),
        VarNode::Null => "Null".to_string(),
        VarNode::Maybe { var_node } => format!("Maybe[{}]", var_label(var_node)),
        VarNode::List { var_node } => format!("List[{}]", var_label(var_node)),
        VarNode::Set { var_node } => format!("Set[{}]", var_label(var_node)),
        VarNode::Dict {
            key_var_node,
            val_var_node,
        } => format!(
            "Dict[{}, {}]",
            var_label(key_var_node),
            var_label(val_var_node)
        ),
        VarNode::Tuple { var_nodes } => {
            let labels: Vec<String> = var_nodes.iter().map(var_label).collect();
            format!("Tuple[{}]", labels.join(", "))
        }
        VarNode::Struct(Struct { name, .. }) => format!("Struct[{name}]"),
        VarNode::Enum(Enum { name, .. }) => format!("Enum[{name}]"),
        VarNode::Func(func) => {
            let params: Vec<String> = func
                .params
                .values()
                .map(|param| var_label(&param.var_node))
                .collect();
            if params.is_empty() {
                format!("Func[-> {}]", var_label(&func.return_var_node))
            } else {
                format!(
                    "Func[{} -> {}]",
                    params.join(", "),
                    var_label(&func.return_var_node)
                )
            }
        }
    }
}
