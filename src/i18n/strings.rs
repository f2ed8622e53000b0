/// All localized pipeline strings for a language
///
/// These fill blank record fields, build the provider prompt's localization
/// block, and populate the error entry returned when every source fails.
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Field Defaults ====================
    /// Title used when a record has none
    pub untitled: &'static str,

    /// Attribution used when a record has none
    pub unknown_source: &'static str,

    /// Type used when a record has none
    pub default_type: &'static str,

    /// Style used when a record has none
    pub default_style: &'static str,

    /// Themes used when the field is blank
    pub default_themes: &'static str,

    /// Motifs used when the field is blank
    pub default_motifs: &'static str,

    /// Interpretation used when a record has none
    pub default_interpretation: &'static str,

    // ==================== Error Entry ====================
    pub error_title: &'static str,
    pub error_source: &'static str,
    pub error_type: &'static str,
    pub error_style: &'static str,

    /// Body of the error entry
    /// Placeholders: {error}
    pub error_content: &'static str,

    /// Failure description substituted into `error_content`
    pub error_reason: &'static str,

    pub error_themes: &'static str,
    pub error_motifs: &'static str,
    pub error_interpretation: &'static str,

    /// Fixed word count reported for the error entry (not measured)
    pub error_word_count: u32,

    // ==================== Localization ====================
    /// Characters that only appear in already-localized text.
    /// Empty for the canonical language.
    pub localized_markers: &'static [char],

    /// Extra prompt instructions asking the provider to write every field in
    /// this language. Empty for the canonical language.
    pub prompt_instructions: &'static str,
}

impl LanguageStrings {
    /// Render the error entry body for a failure description
    pub fn error_content_for(&self, error: &str) -> String {
        self.error_content.replace("{error}", error)
    }
}

// ==================== English Strings ====================

/// English language strings (canonical)
pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    // Field defaults
    untitled: "Untitled",
    unknown_source: "Unknown",
    default_type: "Text",
    default_style: "Not specified",
    default_themes: "Literary themes, personal reflection",
    default_motifs: "Literary devices, imagery",
    default_interpretation: "This text aims to help you understand and practice common vocabulary and phrases in context. Pay attention to how ideas are connected and how the language is structured to convey meaning effectively.",

    // Error entry
    error_title: "Error",
    error_source: "System",
    error_type: "Error",
    error_style: "Error",
    error_content: "We encountered a problem: {error}. Using sample texts instead.",
    error_reason: "no texts are available right now",
    error_themes: "Technical difficulties, error handling",
    error_motifs: "System messages, error notifications",
    error_interpretation: "This message indicates that the application encountered an issue while trying to fetch texts. The error has been logged and the system is using fallback texts.",
    error_word_count: 20,

    // Localization
    localized_markers: &[],
    prompt_instructions: "",
};

// ==================== Czech Strings ====================

/// Czech language strings
pub const CZECH_STRINGS: LanguageStrings = LanguageStrings {
    // Field defaults
    untitled: "Bez názvu",
    unknown_source: "Neznámý",
    default_type: "Text",
    default_style: "Neurčeno",
    default_themes: "Literární témata, osobní reflexe",
    default_motifs: "Literární prostředky, obraznost",
    default_interpretation: "Tento text vám pomůže porozumět a procvičit běžnou slovní zásobu a fráze v kontextu. Věnujte pozornost tomu, jak jsou myšlenky propojeny a jak je jazyk strukturován, aby efektivně předával význam.",

    // Error entry
    error_title: "Chyba",
    error_source: "Systém",
    error_type: "Chyba",
    error_style: "Chyba",
    error_content: "Nastal problém: {error}. Používají se ukázkové texty.",
    error_reason: "momentálně nejsou k dispozici žádné texty",
    error_themes: "Technické obtíže, zpracování chyb",
    error_motifs: "Systémové zprávy, oznámení o chybách",
    error_interpretation: "Tato zpráva označuje, že aplikace narazila na problém při načítání textů. Chyba byla zaznamenána a systém používá záložní texty.",
    error_word_count: 10,

    // Localization
    localized_markers: &[
        'á', 'č', 'ď', 'é', 'ě', 'í', 'ň', 'ó', 'ř', 'š', 'ť', 'ú', 'ů', 'ý', 'ž',
    ],
    prompt_instructions: "IMPORTANT: Since the user has selected Czech, ALL content including titles, author names, metadata descriptions, themes, motifs, interpretation, and style must be IN CZECH LANGUAGE ONLY.
- Ensure ALL metadata (title, type, style, themes, motifs, interpretation) is written in Czech
- NO English words should appear anywhere in the response
- Make sure to use proper Czech diacritics and grammar
- Translate any English quotes or concepts into Czech",
};
