//! querytree - inspect query types and type operations from the command line

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use log::{debug, info};
use querytree::expression::{type_check_against, QueryExpression, TypeOperator};
use querytree::schema::SchemaDocument;
use querytree::types::{QueryType, TypeRegistry};
use std::path::PathBuf;

/// Inspect query types and type operations
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON schema file (defaults to the built-in demo schema)
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the types defined by the schema
    Types,

    /// Build `<source> <operator> <target>` and print the resulting node
    Check {
        /// Static type of the source expression, e.g. `Customer`
        source: String,

        /// Type operator to apply
        #[arg(value_enum)]
        operator: Operator,

        /// Target type, e.g. `Person` or `Collection(Order)`
        target: String,

        /// Print the node as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Operator {
    As,
    IsOf,
    Cast,
    OfType,
}

impl From<Operator> for TypeOperator {
    fn from(operator: Operator) -> Self {
        match operator {
            Operator::As => TypeOperator::As,
            Operator::IsOf => TypeOperator::IsOf,
            Operator::Cast => TypeOperator::Cast,
            Operator::OfType => TypeOperator::OfType,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let document = match &args.schema {
        Some(path) => {
            info!("Loading schema from {}", path.display());
            SchemaDocument::from_path(path)?
        }
        None => SchemaDocument::demo()?,
    };
    let registry = document.into_registry().context("Failed to load schema")?;

    match args.command {
        Command::Types => list_types(&registry),
        Command::Check {
            source,
            operator,
            target,
            json,
        } => check(&registry, &source, operator.into(), &target, json),
    }
}

fn list_types(registry: &TypeRegistry) -> Result<()> {
    for ty in registry.user_types() {
        match &ty {
            QueryType::Entity(entity) => {
                match entity.base() {
                    Some(base) => println!("entity {} : {}", entity.name(), base.name()),
                    None => println!("entity {}", entity.name()),
                }
                for property in entity.declared_properties() {
                    println!("    {}: {}", property.name(), property.ty());
                }
            }
            QueryType::Complex(complex) => {
                println!("complex {}", complex.name());
                for property in complex.properties() {
                    println!("    {}: {}", property.name(), property.ty());
                }
            }
            other => println!("{}", other),
        }
    }
    Ok(())
}

fn check(
    registry: &TypeRegistry,
    source: &str,
    operator: TypeOperator,
    target: &str,
    json: bool,
) -> Result<()> {
    let source_type = registry
        .resolve(source)
        .with_context(|| format!("Invalid source type '{}'", source))?;
    let target_type = registry
        .resolve(target)
        .with_context(|| format!("Invalid target type '{}'", target))?;

    let root = QueryExpression::root(source.trim(), source_type)?;
    let expr = QueryExpression::type_operation(operator, root, target_type)
        .context("Type operation rejected")?;
    type_check_against(&expr, registry)?;
    debug!("Built {:?}", expr);

    if json {
        println!("{}", serde_json::to_string_pretty(&expr)?);
    } else {
        println!("{}", expr);
        println!("result type: {}", expr.result_type());
    }
    Ok(())
}
