use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use serde::Serialize;
use sprig_core::*;
use tracing::debug;

/// Sample, shrink and inspect Sprig arbitraries
#[derive(Parser, Debug)]
#[command(name = "sprig", version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print draws from one seeded generator
    Sample {
        #[command(flatten)]
        source: Source,

        /// Number of values to draw
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },

    /// Follow the first child of the first draw down to its minimum
    Shrink {
        #[command(flatten)]
        source: Source,

        /// Maximum number of shrink steps to follow
        #[arg(long, default_value_t = 1000)]
        limit: usize,
    },

    /// Render the top of the first draw's shrink tree
    Tree {
        #[command(flatten)]
        source: Source,

        /// Levels of children to render
        #[arg(long, default_value_t = 2)]
        depth: usize,

        /// Children rendered per node
        #[arg(long, default_value_t = 4)]
        breadth: usize,
    },
}

/// Which arbitrary to draw from, and how.
#[derive(Args, Debug, Clone)]
pub struct Source {
    /// Value domain
    #[arg(short, long, value_enum, default_value_t = Kind::Json)]
    pub kind: Kind,

    /// Run seed (falls back to SPRIG_SEED, then to a fresh seed)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Container nesting budget for structured kinds
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

#[derive(ValueEnum, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    Json,
    UnicodeJson,
    Anything,
    Object,
    Integer,
    String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Kind {
    /// The arbitrary behind this kind, with values rendered as text.
    ///
    /// Structured kinds render as compact JSON; strings are quoted.
    pub fn arbitrary(self, max_depth: usize) -> Result<BoxedArbitrary<String>> {
        let constraints = ObjectConstraints::default().with_max_depth(max_depth);
        let arbitrary = match self {
            Kind::Json => json_with(max_depth).boxed(),
            Kind::UnicodeJson => unicode_json_with(max_depth).boxed(),
            Kind::Anything => anything(constraints)?.map(|v: Value| v.to_string()).boxed(),
            Kind::Object => object(constraints)?.map(|v: Value| v.to_string()).boxed(),
            Kind::Integer => integer().map(|i: i64| i.to_string()).boxed(),
            Kind::String => string().map(|s: String| Value::Text(s).to_string()).boxed(),
        };
        Ok(arbitrary)
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Json => "json",
            Kind::UnicodeJson => "unicode-json",
            Kind::Anything => "anything",
            Kind::Object => "object",
            Kind::Integer => "integer",
            Kind::String => "string",
        }
    }
}

impl Source {
    /// Explicit seed, then `SPRIG_SEED`, then a fresh one.
    pub fn resolve_seed(&self) -> Result<u64> {
        match self.seed {
            Some(seed) => Ok(seed),
            None => Ok(Config::from_env()?.seed.unwrap_or_else(random_seed)),
        }
    }
}

#[derive(Serialize)]
struct SampleReport {
    kind: Kind,
    seed: u64,
    values: Vec<String>,
}

#[derive(Serialize)]
struct ShrinkReport {
    kind: Kind,
    seed: u64,
    path: Vec<String>,
}

#[derive(Serialize)]
struct TreeReport {
    kind: Kind,
    seed: u64,
    tree: TreeNode,
}

#[derive(Serialize)]
struct TreeNode {
    value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn build(tree: &Shrinkable<String>, depth: usize, breadth: usize) -> TreeNode {
        let children = if depth == 0 {
            Vec::new()
        } else {
            tree.shrinks()
                .take(breadth)
                .map(|child| TreeNode::build(&child, depth - 1, breadth))
                .collect()
        };
        TreeNode {
            value: tree.value.clone(),
            children,
        }
    }
}

/// Execute a parsed command and return what should be printed.
pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Sample { source, count } => sample(source, *count),
        Command::Shrink { source, limit } => shrink(source, *limit),
        Command::Tree {
            source,
            depth,
            breadth,
        } => tree(source, *depth, *breadth),
    }
}

fn sample(source: &Source, count: usize) -> Result<String> {
    let seed = source.resolve_seed()?;
    let arbitrary = source.kind.arbitrary(source.max_depth)?;
    debug!("Sampling {} {} values with seed {}", count, source.kind.name(), seed);

    let mut rng = SplitMix::new(seed);
    let values: Vec<String> = (0..count).map(|_| arbitrary.generate(&mut rng).value).collect();

    match source.format {
        Format::Json => Ok(serde_json::to_string_pretty(&SampleReport {
            kind: source.kind,
            seed,
            values,
        })? + "\n"),
        Format::Text => {
            let mut output = format_header("Sample", source.kind, seed);
            for value in values {
                output.push_str(&format!("{value}\n"));
            }
            Ok(output)
        }
    }
}

fn shrink(source: &Source, limit: usize) -> Result<String> {
    let seed = source.resolve_seed()?;
    let arbitrary = source.kind.arbitrary(source.max_depth)?;
    debug!("Shrinking a {} value with seed {}", source.kind.name(), seed);

    let tree = arbitrary.generate(&mut SplitMix::new(seed));
    match source.format {
        Format::Json => Ok(serde_json::to_string_pretty(&ShrinkReport {
            kind: source.kind,
            seed,
            path: tree.first_child_path(limit),
        })? + "\n"),
        Format::Text => {
            let mut output = format_header("Shrink", source.kind, seed);
            output.push_str(&tree.render_path(limit));
            Ok(output)
        }
    }
}

fn tree(source: &Source, depth: usize, breadth: usize) -> Result<String> {
    let seed = source.resolve_seed()?;
    let arbitrary = source.kind.arbitrary(source.max_depth)?;
    debug!("Rendering a {} shrink tree with seed {}", source.kind.name(), seed);

    let tree = arbitrary.generate(&mut SplitMix::new(seed));
    match source.format {
        Format::Json => Ok(serde_json::to_string_pretty(&TreeReport {
            kind: source.kind,
            seed,
            tree: TreeNode::build(&tree, depth, breadth),
        })? + "\n"),
        Format::Text => {
            let mut output = format_header("Tree", source.kind, seed);
            output.push_str(&tree.render(depth, breadth));
            Ok(output)
        }
    }
}

/// Format header output
pub fn format_header(title: &str, kind: Kind, seed: u64) -> String {
    format!(
        "{} {} {}\n",
        title.bright_green().bold(),
        kind.name().bright_cyan(),
        format!("(seed {seed})").bright_yellow()
    )
}
