use crate::core::error::DeckResult;
use crate::release::version::{compare_versions, compare_versions_with_codes};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Comparison<'a> {
  a: &'a str,
  b: &'a str,
  #[serde(skip_serializing_if = "Option::is_none")]
  code_a: Option<&'a str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  code_b: Option<&'a str>,
  result: i64,
  ordering: &'static str,
}

fn symbol(result: i64) -> &'static str {
  match result.signum() {
    -1 => "<",
    0 => "=",
    _ => ">",
  }
}

/// Compare two versions with optional build-number tie-break
pub fn run_compare(a: &str, b: &str, code_a: Option<&str>, code_b: Option<&str>, json: bool) -> DeckResult<()> {
  let result = match (code_a, code_b) {
    (None, None) => compare_versions(a, b),
    _ => compare_versions_with_codes(a, code_a, b, code_b),
  };
  let ordering = symbol(result);

  if json {
    let output = Comparison {
      a,
      b,
      code_a,
      code_b,
      result,
      ordering,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
  } else {
    println!("{} {} {} ({})", a, ordering, b, result);
  }
  Ok(())
}
