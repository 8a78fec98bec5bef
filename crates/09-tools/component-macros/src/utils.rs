//! 宏工具函数

use syn::{Field, GenericArgument, Ident, PathArguments, Type};

/// 层级参数与能力 trait 的对应关系
const LAYERS: &[(&str, &str, &str)] = &[
    ("config", "Config", "ConfigProvider"),
    ("entity", "Entity", "Entity"),
    ("manager", "Manager", "Manager"),
    ("repository", "Repository", "Repository"),
    ("service", "Service", "Service"),
    ("controller", "Controller", "Controller"),
    ("middleware", "Middleware", "Middleware"),
    ("scheduler", "Scheduler", "Scheduler"),
    ("listener", "Listener", "Listener"),
];

/// 按宏参数查找层级，返回 `(Layer 变体, 能力 trait)`
pub fn lookup_layer(arg: &str) -> Option<(&'static str, &'static str)> {
    LAYERS
        .iter()
        .find(|(name, _, _)| *name == arg)
        .map(|(_, variant, base)| (*variant, *base))
}

/// 所有可用的层级参数，用于错误提示
pub fn layer_names() -> String {
    LAYERS
        .iter()
        .map(|(name, _, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// 从 `Wrapper<T>` 中提取 `T`，最后一段名称必须是 `wrapper`
pub fn extract_generic_type<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != wrapper {
        return None;
    }
    match &segment.arguments {
        PathArguments::AngleBracketed(args) if args.args.len() == 1 => match args.args.first() {
            Some(GenericArgument::Type(inner)) => Some(inner),
            _ => None,
        },
        _ => None,
    }
}

/// 检查字段是否有特定属性
pub fn field_has_attribute(field: &Field, attr_name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(attr_name))
}

/// 字段名称字符串，去掉原始标识符前缀
pub fn field_name(ident: &Ident) -> String {
    let name = ident.to_string();
    name.strip_prefix("r#").map(str::to_string).unwrap_or(name)
}
