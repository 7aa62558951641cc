use serde::{Deserialize, Serialize};

/// Root configuration structure for gomsort
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsortConfig {
    /// Comparator keys, applied in a fixed order
    #[serde(alias = "sort_criteria")]
    pub sort: SortCriteria,

    /// How calls on the receiver are recognized
    pub receiver: ReceiverMatching,

    /// Where the sorted methods are placed
    pub layout: LayoutConfig,

    /// File name globs to process
    pub include: Vec<String>,

    /// Path globs to skip
    pub exclude: Vec<String>,

    /// Skip `_test.go` files
    pub skip_tests: bool,

    /// Skip files carrying the `// Code generated ... DO NOT EDIT.` marker
    pub skip_generated: bool,
}

impl Default for MsortConfig {
    fn default() -> Self {
        Self {
            sort: SortCriteria::default(),
            receiver: ReceiverMatching::default(),
            layout: LayoutConfig::default(),
            include: vec!["*.go".to_string()],
            exclude: Vec::new(),
            skip_tests: true,
            skip_generated: true,
        }
    }
}

/// Keys of the method comparator. A disabled key is removed from the chain
/// and comparison falls through to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortCriteria {
    /// Group methods by receiver type name, ascending
    pub group_by_receiver: bool,
    /// Exported methods before unexported ones
    pub exported_first: bool,
    /// Lower call depth first
    pub sort_by_depth: bool,
    /// Lower in-degree first, so shared helpers sink
    pub sort_by_in_degree: bool,
    /// Final tie-break on declaration order
    #[serde(alias = "preserve_orig_order")]
    pub preserve_original_order: bool,
}

impl Default for SortCriteria {
    fn default() -> Self {
        Self {
            group_by_receiver: true,
            exported_first: true,
            sort_by_depth: true,
            sort_by_in_degree: true,
            preserve_original_order: true,
        }
    }
}

/// Self-reference detection for the call graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiverMatching {
    /// Identifiers always treated as the receiver
    pub aliases: Vec<String>,
    /// Treat a one-letter identifier equal to the receiver's first letter
    /// (ignoring case) as the receiver
    pub single_letter_fallback: bool,
}

impl Default for ReceiverMatching {
    fn default() -> Self {
        Self {
            aliases: vec!["self".to_string()],
            single_letter_fallback: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub method_placement: MethodPlacement,
}

/// Position of the sorted method run among the other declarations
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MethodPlacement {
    /// After every non-method declaration
    #[default]
    End,
    /// Where the first method of the file was declared
    FirstMethod,
}
