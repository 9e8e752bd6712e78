//! Guess the language of a source file from its name.

use std::path::Path;
use std::sync::LazyLock;

use glob::Pattern;

/// File name patterns and the topic they map to, checked in order.
static LANGUAGES: LazyLock<Vec<(Pattern, &'static str)>> = LazyLock::new(|| {
    [
        ("*.py", "python"),
        ("*.pyw", "python"),
        ("*.js", "javascript"),
        ("*.mjs", "javascript"),
        ("*.cjs", "javascript"),
        ("*.jsx", "javascript"),
    ]
    .into_iter()
    .map(|(glob, language)| {
        let pattern = Pattern::new(glob).expect("compile language glob");
        (pattern, language)
    })
    .collect()
});

/// The topic for a source file, if its name is recognized.
pub fn infer(path: &Path) -> Option<&'static str> {
    let name = path.file_name()?.to_str()?;
    LANGUAGES
        .iter()
        .find(|(pattern, _)| pattern.matches(name))
        .map(|(_, language)| *language)
}

#[cfg(test)]
mod tests {
    use simple_test_case::test_case;

    use super::*;

    #[test_case("main.py", Some("python"); "python")]
    #[test_case("src/app/index.js", Some("javascript"); "nested javascript")]
    #[test_case("lib.mjs", Some("javascript"); "module javascript")]
    #[test_case("README.md", None; "unknown extension")]
    #[test_case("Makefile", None; "no extension")]
    #[test]
    fn test_infer(path: &str, expected: Option<&str>) {
        assert_eq!(infer(Path::new(path)), expected);
    }
}
