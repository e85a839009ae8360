use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::str::FromStr;

use fincalc_core::input::FieldSpec;
use fincalc_core::investment::{SipInput, SIP_FIELDS};
use fincalc_core::loan::{LoanInput, LOAN_FIELDS};
use fincalc_core::{CalcError, Calculator, GroupingStyle, NumberFormat, RawInput, Session};

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum CalculatorKind {
    Emi,
    Sip,
}

/// Arguments for replaying field edits
#[derive(Args)]
pub struct SessionArgs {
    /// Which calculator to drive
    #[arg(long, value_enum)]
    pub calculator: CalculatorKind,

    /// JSON/YAML file with a list of {"field": ..., "value": ...} edits
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for listing input fields
#[derive(Args)]
pub struct FieldsArgs {
    #[arg(long, value_enum)]
    pub calculator: CalculatorKind,
}

/// One user edit: a field key and whatever was typed or slid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edit {
    pub field: String,
    pub value: RawInput,
}

pub fn run_session(
    args: SessionArgs,
    fmt: &NumberFormat<GroupingStyle>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let edits: Vec<Edit> = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <edits.json> or stdin required for session replay".into());
    };

    match args.calculator {
        CalculatorKind::Emi => replay::<LoanInput>(&edits, fmt),
        CalculatorKind::Sip => replay::<SipInput>(&edits, fmt),
    }
}

/// Apply `edits` in order from the calculator defaults, recording after each
/// one whether it was accepted and what the outputs became.
fn replay<C>(edits: &[Edit], fmt: &NumberFormat<GroupingStyle>) -> Result<Value, Box<dyn std::error::Error>>
where
    C: Calculator + Serialize,
    C::Field: FromStr<Err = CalcError>,
    C::Output: Serialize,
{
    let mut session: Session<C> = Session::default();
    let mut steps: Vec<Value> = Vec::with_capacity(edits.len());

    for (i, edit) in edits.iter().enumerate() {
        let field: C::Field = edit.field.parse()?;
        let applied = session.edit(field, edit.value.clone());
        if !applied {
            log::warn!("edit {} ignored: {} = {:?}", i + 1, edit.field, edit.value.to_string());
        }

        let mut row = serde_json::Map::new();
        row.insert("step".into(), json!(i + 1));
        row.insert("field".into(), json!(field.to_string()));
        row.insert("typed".into(), json!(edit.value.to_string()));
        row.insert("applied".into(), json!(applied));
        row.insert("shown".into(), json!(session.display_value(field, fmt)));
        if let Value::Object(outputs) = serde_json::to_value(session.output())? {
            row.extend(outputs);
        }
        steps.push(Value::Object(row));
    }

    Ok(json!({
        "results": steps,
        "final_input": serde_json::to_value(session.input())?,
        "final_output": serde_json::to_value(session.output())?,
    }))
}

pub fn run_fields(args: FieldsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let specs: &[FieldSpec] = match args.calculator {
        CalculatorKind::Emi => &LOAN_FIELDS,
        CalculatorKind::Sip => &SIP_FIELDS,
    };
    Ok(json!({ "results": specs }))
}
