//! Shared fixture packages and node constructors for unit tests. The
//! euler/flatty/interlet/app ecosystem mirrors a small realistic registry.

use std::collections::BTreeMap;

use crate::nodes::{Const, Enum, Field, Func, MemberNode, Mod, Param, Struct, VarNode, Variant};
use crate::package::{Dependency, Package};
use crate::version::Version;

pub fn param(name: &str, var_node: VarNode) -> Param {
    Param {
        name: name.to_string(),
        var_node,
    }
}

pub fn field(name: &str, var_node: VarNode) -> Field {
    Field {
        name: name.to_string(),
        var_node,
    }
}

pub fn variant(name: &str, var_node: VarNode) -> Variant {
    Variant {
        name: name.to_string(),
        var_node,
    }
}

pub fn const_node(name: &str, var_node: VarNode) -> Const {
    Const {
        name: name.to_string(),
        var_node,
    }
}

pub fn func(name: &str, params: Vec<Param>, return_var_node: VarNode) -> Func {
    Func {
        name: name.to_string(),
        params: params
            .into_iter()
            .map(|param| (param.name.clone(), param))
            .collect(),
        return_var_node,
    }
}

pub fn struct_node(name: &str, fields: Vec<Field>) -> Struct {
    Struct {
        name: name.to_string(),
        fields: fields
            .into_iter()
            .map(|field| (field.name.clone(), field))
            .collect(),
    }
}

pub fn enum_node(name: &str, variants: Vec<Variant>) -> Enum {
    Enum {
        name: name.to_string(),
        variants: variants
            .into_iter()
            .map(|variant| (variant.name.clone(), variant))
            .collect(),
    }
}

pub fn mod_node(name: &str, members: Vec<MemberNode>) -> Mod {
    let members: BTreeMap<String, MemberNode> = members
        .into_iter()
        .map(|member| (member.name().to_string(), member))
        .collect();
    Mod {
        name: name.to_string(),
        members,
    }
}

/// Apply an edit to a module member of `package`, reinserting it afterwards.
pub fn modify_mod(package: &mut Package, name: &str, update: impl FnOnce(&mut Mod)) {
    let Some(mut member) = package.members.remove(name) else {
        panic!("package has no member named {name}");
    };
    match &mut member {
        MemberNode::Mod(module) => update(module),
        other => panic!("{name} is not a module: {other:?}"),
    }
    package.members.insert(member);
}

pub fn package_with_deps(name: &str, version: &str, deps: &[(&str, &str)]) -> Package {
    let version: Version = version.parse().unwrap();
    let dependencies = deps
        .iter()
        .map(|(dep_name, dep_version)| {
            Dependency::new(*dep_name, dep_version.parse().unwrap())
        })
        .collect();
    Package::new(name, version, dependencies)
}

pub fn euler_package() -> Package {
    let trig = mod_node(
        "trig",
        vec![
            MemberNode::Func(func("sin", vec![param("x", VarNode::Float)], VarNode::Float)),
            MemberNode::Func(func("cos", vec![param("x", VarNode::Float)], VarNode::Float)),
            MemberNode::Func(func("tan", vec![param("x", VarNode::Float)], VarNode::Float)),
        ],
    );
    let math = mod_node(
        "math",
        vec![
            MemberNode::Const(const_node("pi", VarNode::Float)),
            MemberNode::Const(const_node("e", VarNode::Float)),
            MemberNode::Func(func(
                "add",
                vec![param("a", VarNode::Int), param("b", VarNode::Int)],
                VarNode::Int,
            )),
            MemberNode::Func(func(
                "sub",
                vec![param("a", VarNode::Int), param("b", VarNode::Int)],
                VarNode::Int,
            )),
            MemberNode::Mod(trig),
        ],
    );
    let mut package = package_with_deps("euler", "0.1", &[]);
    package.info.description = Some("A compilation of useful math stuff".to_string());
    package.members.insert(MemberNode::Mod(math));
    package
}

pub fn flatty_package() -> Package {
    let mut package = package_with_deps("flatty", "2.0", &[]);
    package.info.description = Some("A package for serializing and deserializing data".to_string());
    package.members.insert(MemberNode::Func(func(
        "serialize",
        vec![param("data", VarNode::Str)],
        VarNode::Str,
    )));
    package.members.insert(MemberNode::Func(func(
        "deserialize",
        vec![param("data", VarNode::Str)],
        VarNode::Str,
    )));
    package
}

pub fn interlet_package() -> Package {
    let router = mod_node(
        "router",
        vec![MemberNode::Func(func(
            "serve",
            vec![param("host", VarNode::Str), param("port", VarNode::Int)],
            VarNode::Null,
        ))],
    );
    let mut package = package_with_deps("interlet", "3.4", &[]);
    package.info.description = Some("A blazingly fast webserver".to_string());
    package.members.insert(MemberNode::Mod(router));
    package
}

pub fn app_package() -> Package {
    let main = mod_node(
        "main",
        vec![MemberNode::Func(func("run", vec![], VarNode::Null))],
    );
    let mut package = package_with_deps("app", "1.2", &[]);
    package.info.description = Some("A fun app for doing math".to_string());
    package.members.insert(MemberNode::Mod(main));
    package
}
