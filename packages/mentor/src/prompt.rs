//! Prompt templates sent to the completer.

use indoc::formatdoc;

/// Ask for a beginner-friendly walkthrough of `code`.
pub fn explain(language: &str, code: &str) -> String {
    formatdoc! {"
        You are a patient programming mentor. Explain what the following {language} code does,
        step by step, for someone who is still learning the language. Keep it short and concrete.

        ```{language}
        {code}
        ```
    "}
}

/// Ask for likely bugs in `code` and how to fix them.
pub fn debug(language: &str, code: &str) -> String {
    formatdoc! {"
        You are a patient programming mentor. Review the following {language} code for bugs.
        For each problem, name it, say why it is a problem, and show the corrected line.
        If you find nothing wrong, say so.

        ```{language}
        {code}
        ```
    "}
}
