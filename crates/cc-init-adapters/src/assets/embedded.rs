//! Compile-time embedded `.claude` template files.
//!
//! Paths are bundle paths (slash-separated, including the `.claude` root).
//! The `include_bytes!` paths are relative to this file.

/// Every bundled file as `(bundle path, content)`.
pub static FILES: &[(&str, &[u8])] = &[
    (
        ".claude/settings.json",
        include_bytes!("../../assets/.claude/settings.json"),
    ),
    (
        ".claude/agents/code-reviewer.md",
        include_bytes!("../../assets/.claude/agents/code-reviewer.md"),
    ),
    (
        ".claude/agents/test-writer.md",
        include_bytes!("../../assets/.claude/agents/test-writer.md"),
    ),
    (
        ".claude/commands/explain.md",
        include_bytes!("../../assets/.claude/commands/explain.md"),
    ),
    (
        ".claude/commands/review.md",
        include_bytes!("../../assets/.claude/commands/review.md"),
    ),
    (
        ".claude/commands/test.md",
        include_bytes!("../../assets/.claude/commands/test.md"),
    ),
    (
        ".claude/hooks/block-secrets.sh",
        include_bytes!("../../assets/.claude/hooks/block-secrets.sh"),
    ),
    (
        ".claude/hooks/format-check.sh",
        include_bytes!("../../assets/.claude/hooks/format-check.sh"),
    ),
];
