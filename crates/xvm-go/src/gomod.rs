use std::path::Path;

use xvm_sdk::{ProjectManifest, XvmError};

/// Reads the `go` directive of a `go.mod` file.
pub struct GoModManifest;

impl ProjectManifest for GoModManifest {
    fn file_name(&self) -> &'static str {
        "go.mod"
    }

    fn parse_version(&self, path: &Path, contents: &str) -> Result<Option<String>, XvmError> {
        parse_go_directive(contents)
            .map_err(|(line, details)| XvmError::manifest_parse(path, format!("{line}: {details}")))
    }
}

/// The version named by the top-level `go` directive, if any. Errors carry
/// the 1-based line number.
///
/// # Errors
/// Returns the offending line and a description when the directive is
/// repeated, has the wrong number of arguments, or names an invalid version.
pub fn parse_go_directive(contents: &str) -> Result<Option<String>, (usize, String)> {
    let mut version: Option<String> = None;
    let mut depth = 0usize;

    for (index, raw) in contents.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.split("//").next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        if depth > 0 {
            if line == ")" {
                depth -= 1;
            }
            continue;
        }
        if line.ends_with('(') {
            depth += 1;
            continue;
        }

        let mut fields = line.split_whitespace();
        if fields.next() != Some("go") {
            continue;
        }
        let args: Vec<&str> = fields.collect();
        let [value] = args.as_slice() else {
            return Err((line_no, "usage: go 1.23".to_string()));
        };
        if !is_valid_go_version(value) {
            return Err((line_no, format!("invalid go version '{value}'")));
        }
        if version.is_some() {
            return Err((line_no, "repeated go statement".to_string()));
        }
        version = Some((*value).to_string());
    }

    Ok(version)
}

/// `1.21`, `1.21.3` or `1.22rc1`.
fn is_valid_go_version(value: &str) -> bool {
    let numeric = |part: &str| {
        !part.is_empty()
            && part.bytes().all(|b| b.is_ascii_digit())
            && (part == "0" || !part.starts_with('0'))
    };

    let core_end = value
        .find(|c: char| c.is_ascii_lowercase())
        .unwrap_or(value.len());
    let (core, pre) = value.split_at(core_end);

    let parts: Vec<&str> = core.split('.').collect();
    let core_ok = matches!(parts.len(), 2 | 3)
        && parts.iter().all(|part| numeric(part))
        && !parts[0].starts_with('0');

    let pre_ok = pre.is_empty() || {
        let digits_at = pre
            .find(|c: char| c.is_ascii_digit())
            .unwrap_or(pre.len());
        let (letters, digits) = pre.split_at(digits_at);
        !letters.is_empty()
            && letters.bytes().all(|b| b.is_ascii_lowercase())
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
    };

    core_ok && pre_ok
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use xvm_sdk::{ProjectManifest, XvmError};

    use super::{GoModManifest, parse_go_directive};

    #[test]
    fn reads_go_directive() {
        let contents = "module example.com/app\n\ngo 1.21\n\nrequire (\n\tgolang.org/x/mod v0.14.0\n)\n";

        assert_eq!(parse_go_directive(contents), Ok(Some("1.21".to_string())));
    }

    #[test]
    fn accepts_patch_and_prerelease_versions() {
        assert_eq!(
            parse_go_directive("go 1.21.3 // pinned\n"),
            Ok(Some("1.21.3".to_string()))
        );
        assert_eq!(
            parse_go_directive("go 1.22rc1\n"),
            Ok(Some("1.22rc1".to_string()))
        );
    }

    #[test]
    fn missing_directive_is_none() {
        assert_eq!(parse_go_directive("module example.com/app\n"), Ok(None));
    }

    #[test]
    fn directives_inside_blocks_are_ignored() {
        let contents = "module m\nrequire (\n\tgo 1.x\n)\ngo 1.20\n";

        assert_eq!(parse_go_directive(contents), Ok(Some("1.20".to_string())));
    }

    #[test]
    fn invalid_version_is_rejected() {
        assert!(parse_go_directive("go 1\n").is_err());
        assert!(parse_go_directive("go v1.21\n").is_err());
        assert!(parse_go_directive("go 1.021\n").is_err());
        assert!(parse_go_directive("go 1.21 extra\n").is_err());
    }

    #[test]
    fn repeated_directive_is_rejected() {
        let result = parse_go_directive("go 1.20\ngo 1.21\n");

        assert_eq!(result, Err((2, "repeated go statement".to_string())));
    }

    #[test]
    fn manifest_errors_name_the_file() {
        let path = Path::new("/work/app/go.mod");

        let result = GoModManifest.parse_version(path, "module m\ngo one\n");

        assert!(matches!(
            result,
            Err(XvmError::ManifestParse { path: ref p, ref details })
                if p == path && details.starts_with("2:")
        ));
    }
}
