//! The content store: every rule and content table, loaded once.
//!
//! Tables are keyed by topic (a language name such as `python`, or a career
//! path such as `backend`). Topic keys are matched exactly; callers normalize
//! case before looking anything up.

use std::collections::BTreeMap;
use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use color_eyre::{
    Section, SectionExt,
    eyre::{Context, Report, Result, bail},
};
use derive_more::Display;
use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};
use tap::Tap;

use crate::{
    content::{Guidance, Lesson, Question},
    rules::{DebugRule, DebugRuleDef, ExplainRule, ExplainRuleDef, MalformedRule, RuleDefect},
};

/// Name of the project-local data directory.
pub const LOCAL_DATA_DIR: &str = "mentor-data";

static STORE: OnceLock<Store> = OnceLock::new();

/// The five tables a store is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum TableKind {
    #[display("explanation")]
    Explanations,

    #[display("debug")]
    Debug,

    #[display("lesson")]
    Lessons,

    #[display("quiz")]
    Quiz,

    #[display("career")]
    Career,
}

impl TableKind {
    /// All tables, in the order they are loaded.
    pub const ALL: [TableKind; 5] = [
        TableKind::Explanations,
        TableKind::Debug,
        TableKind::Lessons,
        TableKind::Quiz,
        TableKind::Career,
    ];

    /// File name of the table without its extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            TableKind::Explanations => "code_explanations",
            TableKind::Debug => "debug_patterns",
            TableKind::Lessons => "mini_lessons",
            TableKind::Quiz => "quiz_questions",
            TableKind::Career => "career_guidance",
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            TableKind::Explanations => include_str!("../data/code_explanations.json"),
            TableKind::Debug => include_str!("../data/debug_patterns.json"),
            TableKind::Lessons => include_str!("../data/mini_lessons.json"),
            TableKind::Quiz => include_str!("../data/quiz_questions.json"),
            TableKind::Career => include_str!("../data/career_guidance.json"),
        }
    }
}

/// A mapping from topic to an ordered sequence of entries.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Table<T>(BTreeMap<String, Vec<T>>);

impl<T> Table<T> {
    /// Entries for `topic`, or an empty slice if the topic is absent.
    pub fn get(&self, topic: &str) -> &[T] {
        self.0.get(topic).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether the topic is present, even with no entries.
    pub fn contains(&self, topic: &str) -> bool {
        self.0.contains_key(topic)
    }

    /// Topics in the table, sorted.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self(BTreeMap::new())
    }
}

/// All tables, immutable once loaded.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Store {
    explanations: Table<ExplainRule>,
    debug: Table<DebugRule>,
    lessons: Table<Lesson>,
    quiz: Table<Question>,
    career: BTreeMap<String, Guidance>,
}

impl Store {
    /// Explanation rules for `topic`; empty when the topic is unknown.
    pub fn explain_rules(&self, topic: &str) -> &[ExplainRule] {
        self.explanations.get(topic)
    }

    /// Debugging rules for `topic`, in precedence order; empty when the
    /// topic is unknown.
    pub fn debug_rules(&self, topic: &str) -> &[DebugRule] {
        self.debug.get(topic)
    }

    /// Lessons for `topic`; empty when the topic is unknown.
    pub fn lessons(&self, topic: &str) -> &[Lesson] {
        self.lessons.get(topic)
    }

    /// Quiz questions for `topic`; empty when the topic is unknown.
    pub fn questions(&self, topic: &str) -> &[Question] {
        self.quiz.get(topic)
    }

    /// Guidance for a career path.
    pub fn guidance(&self, path: &str) -> Option<&Guidance> {
        self.career.get(path)
    }

    /// Whether `topic` has an entry in the given table.
    pub fn has_topic(&self, kind: TableKind, topic: &str) -> bool {
        match kind {
            TableKind::Explanations => self.explanations.contains(topic),
            TableKind::Debug => self.debug.contains(topic),
            TableKind::Lessons => self.lessons.contains(topic),
            TableKind::Quiz => self.quiz.contains(topic),
            TableKind::Career => self.career.contains_key(topic),
        }
    }

    /// Topics present in the given table, sorted.
    pub fn topics(&self, kind: TableKind) -> Vec<&str> {
        match kind {
            TableKind::Explanations => self.explanations.topics().collect(),
            TableKind::Debug => self.debug.topics().collect(),
            TableKind::Lessons => self.lessons.topics().collect(),
            TableKind::Quiz => self.quiz.topics().collect(),
            TableKind::Career => self.career.keys().map(String::as_str).collect(),
        }
    }

    /// Load the tables embedded in the binary.
    #[tracing::instrument]
    pub fn builtin() -> Result<Self> {
        Self::assemble(|kind| Ok(Some(Document::json(kind.builtin()))))
            .context("load built-in tables")
    }

    /// Load every table from a data directory.
    ///
    /// Each table is read from `<stem>.json`, or `<stem>.yaml` if there is no
    /// JSON file. A missing table is empty. Any malformed entry fails the
    /// whole load.
    #[tracing::instrument]
    pub fn load_from(dir: &Path) -> Result<Self> {
        Self::assemble(|kind| read_table(dir, kind))
            .with_context(|| format!("load tables from {dir:?}"))
    }

    /// Load the store from the first available source.
    ///
    /// Sources, first hit wins:
    /// 1. `explicit`, if given
    /// 2. `mentor-data/` in the current directory
    /// 3. `ProjectDirs::config_dir()/data`
    /// 4. The built-in tables
    #[tracing::instrument]
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match data_dir(explicit) {
            Some(dir) => Self::load_from(&dir),
            None => Self::builtin(),
        }
    }

    fn assemble(mut source: impl FnMut(TableKind) -> Result<Option<Document>>) -> Result<Self> {
        let mut store = Store::default();
        for kind in TableKind::ALL {
            let Some(document) = source(kind)? else {
                tracing::debug!(%kind, "table missing, leaving it empty");
                continue;
            };
            match kind {
                TableKind::Explanations => {
                    store.explanations = compile(kind, &document, |def: ExplainRuleDef| {
                        let key = def.key.clone();
                        ExplainRule::compile(def).map_err(|defect| (key, defect))
                    })?;
                }
                TableKind::Debug => {
                    store.debug = compile(kind, &document, |def: DebugRuleDef| {
                        let key = def.key.clone();
                        DebugRule::compile(def).map_err(|defect| (key, defect))
                    })?;
                }
                TableKind::Lessons => {
                    store.lessons = compile(kind, &document, Ok::<Lesson, (String, RuleDefect)>)?;
                }
                TableKind::Quiz => {
                    store.quiz = compile(kind, &document, |question: Question| {
                        match question.validate() {
                            Ok(()) => Ok(question),
                            Err(defect) => Err((question.question, defect)),
                        }
                    })?;
                }
                TableKind::Career => {
                    store.career = document
                        .parse::<BTreeMap<String, Guidance>>(kind)?
                        .into_iter()
                        .map(|(path, guidance)| (path, guidance.dedup_skills()))
                        .collect();
                }
            }
        }
        Ok(store)
    }
}

/// Publish `store` as the process-wide store.
///
/// The store can be published once; later calls fail.
pub fn init(store: Store) -> Result<&'static Store> {
    if STORE.set(store).is_err() {
        bail!("the content store is already initialized");
    }
    global()
}

/// The process-wide store, falling back to the built-in tables if nothing
/// was published.
pub fn global() -> Result<&'static Store> {
    if let Some(store) = STORE.get() {
        return Ok(store);
    }
    let builtin = Store::builtin()?;
    Ok(STORE.get_or_init(|| builtin))
}

/// Get the project directories for the application.
#[tracing::instrument]
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "mentor", "mentor")
}

/// Resolve the data directory to load from, if any.
pub fn data_dir(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = explicit {
        return Some(dir.to_path_buf());
    }

    let local = PathBuf::from(LOCAL_DATA_DIR);
    if local.is_dir() {
        return Some(local);
    }

    project_dirs()
        .map(|dirs| dirs.config_dir().join("data"))
        .filter(|dir| dir.is_dir())
}

/// The raw text of one table along with how to parse it.
struct Document {
    content: String,
    origin: String,
    format: Format,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Json,
    Yaml,
}

impl Document {
    fn json(content: &str) -> Self {
        Self {
            content: content.to_string(),
            origin: String::from("<built-in>"),
            format: Format::Json,
        }
    }

    fn parse<T: DeserializeOwned>(&self, kind: TableKind) -> Result<T> {
        let parsed = match self.format {
            Format::Json => serde_json::from_str::<T>(&self.content).map_err(Report::from),
            Format::Yaml => serde_yaml::from_str::<T>(&self.content).map_err(Report::from),
        };
        parsed
            .with_context(|| format!("parse {kind} table: {}", self.origin))
            .with_section(|| self.content.clone().header("File content:"))
            .tap(|_| tracing::debug!(%kind, origin = %self.origin, "parsed table"))
    }
}

/// Parse a topic-keyed table and check each entry.
fn compile<D, T>(
    kind: TableKind,
    document: &Document,
    check: impl Fn(D) -> std::result::Result<T, (String, RuleDefect)>,
) -> Result<Table<T>>
where
    D: DeserializeOwned,
{
    let raw = document.parse::<BTreeMap<String, Vec<D>>>(kind)?;
    let mut table = BTreeMap::new();
    for (topic, defs) in raw {
        let mut entries = Vec::with_capacity(defs.len());
        for def in defs {
            let entry = check(def)
                .map_err(|(key, defect)| MalformedRule {
                    table: kind,
                    topic: topic.clone(),
                    key,
                    defect,
                })
                .with_context(|| format!("compile {kind} table: {}", document.origin))?;
            entries.push(entry);
        }
        tracing::debug!(%kind, %topic, entries = entries.len(), "loaded topic");
        table.insert(topic, entries);
    }
    Ok(Table(table))
}

fn read_table(dir: &Path, kind: TableKind) -> Result<Option<Document>> {
    for (extension, format) in [("json", Format::Json), ("yaml", Format::Yaml)] {
        let path = dir.join(kind.file_stem()).with_extension(extension);
        match read_to_string(&path) {
            Ok(content) => {
                return Ok(Some(Document {
                    content,
                    origin: path.display().to_string(),
                    format,
                }));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(e).context(format!("read table file: {path:?}")),
        }
    }
    Ok(None)
}
