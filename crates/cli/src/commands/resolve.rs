use clap::Args;
use swagen_core::{
    EnumRegistry, GenerateError, ResolutionMode, ResolverOptions, Schema, SchemaNode,
    TypeResolver, doc_type, log_parameter,
};

use super::run_command;

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Schema object as inline JSON
    #[arg(long, value_name = "JSON")]
    pub schema: String,
    /// Render names bare, as inside the types module
    #[arg(long = "types-module")]
    pub types_module: bool,
    /// Print the documentation type instead
    #[arg(long, conflicts_with = "types_module")]
    pub doc: bool,
    /// Print the `@logParameter` decorator for the type instead
    #[arg(long, conflicts_with = "doc")]
    pub decorator: bool,
}

/// Resolve one schema; the type line comes first, then any enum declarations.
fn resolve(args: &ResolveArgs) -> Result<String, GenerateError> {
    let schema: Schema = serde_json::from_str(&args.schema)?;
    let node = SchemaNode::classify(&schema);
    if args.doc {
        return Ok(doc_type(Some(&node)));
    }

    let mode = if args.types_module {
        ResolutionMode::TypesModule
    } else {
        ResolutionMode::Default
    };
    let mut registry = EnumRegistry::new();
    let options = ResolverOptions::default();
    let ty = TypeResolver::new(&mut registry, &options)
        .resolve(Some(&node), mode)
        .map_err(|err| GenerateError::at("schema", err))?;

    if args.decorator {
        Ok(log_parameter(&ty))
    } else if registry.is_empty() {
        Ok(ty)
    } else {
        Ok(format!("{ty}\n{}", registry.render()))
    }
}

pub fn run(args: ResolveArgs) -> i32 {
    run_command(|| {
        println!("{}", resolve(&args)?);
        Ok(())
    })
}
