//! Types command handler

use crate::cli::{OutputFormat, TypesArgs};
use crate::error::{Error, Result};
use crate::output::{OutputWriter, TypeSummary};
use fieldcheck_core::{ConstraintSpec, ElementType, FieldType};

/// Handle the types command: print the constraint catalogue
pub fn handle_types(args: TypesArgs, output: &mut OutputWriter) -> Result<()> {
    let types = match args.type_name.as_deref() {
        Some(name) => vec![FieldType::from_name(name).ok_or_else(|| {
            Error::invalid_args(format!(
                "unknown type `{}`; valid types are {}",
                name,
                FieldType::valid_names()
            ))
        })?],
        None => FieldType::ALL.to_vec(),
    };

    if output.format() != OutputFormat::Human {
        let summaries: Vec<TypeSummary> = types.into_iter().map(TypeSummary::from).collect();
        return output.data(&summaries);
    }

    for field_type in types {
        output.section(field_type.name())?;
        let constraints = field_type.constraints();
        if constraints.is_empty() {
            output.writeln("Only `type` and `required` apply.")?;
            continue;
        }

        let rows = constraints
            .iter()
            .map(|spec| vec![spec.name.to_string(), arguments(spec), spec.summary.to_string()])
            .collect();
        output.table(&["Constraint", "Arguments", "Description"], rows)?;

        if field_type == FieldType::Array {
            let element_types: Vec<&str> = ElementType::ALL.iter().map(|t| t.name()).collect();
            output.writeln(&format!("ofType element types: {}", element_types.join(", ")))?;
        }
    }

    Ok(())
}

/// Arguments a constraint takes before its message
fn arguments(spec: &ConstraintSpec) -> String {
    if spec.allows_trailing_flag {
        format!("{} [+ trim flag]", spec.arg_count)
    } else {
        spec.arg_count.to_string()
    }
}
