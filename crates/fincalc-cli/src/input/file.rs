use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file (by extension) and deserialise into a typed
/// struct. Anything that is not `.yaml`/`.yml` is read as JSON.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    log::debug!("reading input from {}", canonical.display());
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let value: T = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    Ok(value)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

/// Resolve the path against the working directory and check it is a file.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincalc_core::loan::LoanInput;
    use std::io::Write;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("fincalc-{}-{}", std::process::id(), name));
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_json_input() {
        let path = temp_file("loan.json", r#"{"principal": 250000, "rate": 9}"#);
        let input: LoanInput = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(input.principal, 250_000.0);
        assert_eq!(input.annual_rate_percent, 9.0);
        assert_eq!(input.tenure_years, 10);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_read_yaml_input() {
        let path = temp_file("loan.yaml", "amount: 500000\ntenure: 5\n");
        let input: LoanInput = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(input.principal, 500_000.0);
        assert_eq!(input.tenure_years, 5);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = read_input::<LoanInput>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
