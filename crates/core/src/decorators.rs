//! Parameter metadata decorators and the `utils` module that defines them.
//!
//! Generated class-based clients tag each parameter with `@logParameter`, so
//! the runtime can recover its type through `reflect-metadata`.

use crate::config::Language;
use crate::format::Format;

/// Path of the utils module, relative to the output directory.
pub fn utils_path(language: Language) -> String {
    format!("utils.{}", language.extension())
}

/// The decorator for a parameter of type `ty`.
///
/// An array type `T[]` becomes `@logParameter(T, true)`.
pub fn log_parameter(ty: &str) -> String {
    match ty.strip_suffix("[]") {
        Some(item) => format!("@logParameter({item}, true)"),
        None => format!("@logParameter({ty})"),
    }
}

/// Render `utils.<lang>`: the `operations`, `optional` and `logParameter`
/// decorators. Type annotations are only written for TypeScript.
pub fn render_utils(language: Language, format: Format) -> String {
    let sp = format.sp();
    let st = format.st();
    let ts = language == Language::Ts;
    let annotate = |name: &str, ty: &str| {
        if ts {
            format!("{name}: {ty}")
        } else {
            name.to_string()
        }
    };
    let target = annotate("target", "any");
    let key = annotate("key", "string");
    let index = if ts { "index?: number" } else { "index" };
    let ty = annotate("type", "Object");
    let is_array = if ts {
        "isArray: boolean = false"
    } else {
        "isArray = false"
    };

    let store = |depth: usize, current: &str| {
        let pad = sp.repeat(depth);
        [
            format!("{pad}let metadata = Reflect.getMetadata(key, target) || []{st}"),
            format!("{pad}let current = {current}{st}"),
            format!("{pad}let elId = metadata.findIndex(el => el.index === index){st}"),
            format!("{pad}if (elId !== -1) metadata[elId] = {{ ...metadata[elId], ...current }}{st}"),
            format!("{pad}else metadata.push(current){st}"),
            format!("{pad}Reflect.defineMetadata(key, metadata, target){st}"),
        ]
        .join("\n")
    };

    let mut out = String::from("// Auto-generated, edits will be overwritten\n");
    out.push_str(&format!("import 'reflect-metadata'{st}\n"));
    out.push_str(&format!(
        "export function operations({target}) {{\n{sp}Reflect.defineMetadata('classType', 'operations', target){st}\n}}\n"
    ));
    out.push_str(&format!(
        "export function optional({target}, {key}, {index}) {{\n{}\n}}\n",
        store(1, "{ index: index, optional: true }")
    ));
    out.push_str(&format!(
        "export function logParameter({ty}, {is_array}) {{\n{sp}return function ({target}, {key}, {index}) {{\n{}\n{sp}}}{st}\n}}\n",
        store(2, "{ index: index, type: type, isArray: isArray }")
    ));
    out
}
