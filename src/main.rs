// mlisp: parse, type-check and view S-expression programs

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mlisp::config::{RenderConfig, DEFAULT_GRAPHVIZ_DIR};
use mlisp::parser::{parse, tokenize};
use mlisp::tree::{DotRenderer, Tree};
use mlisp::ui::TreeViewer;

#[derive(Parser)]
#[command(name = "mlisp")]
#[command(about = "Parse and type-check mlisp programs, then show the syntax tree")]
struct Cli {
    /// Source file (`-` reads stdin)
    file: Option<PathBuf>,

    /// Parse this source text instead of a file
    #[arg(short, long, conflicts_with = "file")]
    expr: Option<String>,

    /// Print the token stream and exit
    #[arg(long)]
    tokens: bool,

    /// Write a Graphviz file into DIR
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = DEFAULT_GRAPHVIZ_DIR)]
    dot: Option<PathBuf>,

    /// Print the tree as an outline instead of opening the viewer
    #[arg(long)]
    no_tui: bool,
}

fn read_source(cli: &Cli) -> io::Result<(String, String)> {
    if let Some(source) = &cli.expr {
        return Ok((source.clone(), "expr".to_string()));
    }

    match cli.file.as_deref() {
        Some(path) if path != Path::new("-") => {
            let source = fs::read_to_string(path)?;
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "ast".to_string());
            Ok((source, stem))
        }
        _ => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok((source, "stdin".to_string()))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never mix with stdout dumps
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("mlisp=info".parse()?))
        .init();

    let cli = Cli::parse();

    let (source, stem) = match read_source(&cli) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: cannot read input: {}", e);
            process::exit(1);
        }
    };

    if cli.tokens {
        match tokenize(&source) {
            Ok(tokens) => {
                for token in tokens {
                    println!("{}", token);
                }
                return Ok(());
            }
            Err(e) => {
                eprintln!("Lexer error: {}", e);
                process::exit(1);
            }
        }
    }

    let program = match parse(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Parser error: {}", e);
            process::exit(1);
        }
    };
    info!("Parsed successfully");

    let tree = Tree::new(program);
    let config = RenderConfig::default().with_file_stem(stem);

    if let Some(dir) = &cli.dot {
        let mut renderer = DotRenderer::new(config.clone().with_graphviz_dir(dir));
        if tree.draw(&mut renderer) {
            if let Some(path) = renderer.written() {
                eprintln!("Graph written to {}", path.display());
            }
        }
    }

    if cli.no_tui {
        for row in tree.build().outline() {
            println!("{}{}", "  ".repeat(row.depth), row.label.replace('\n', " "));
        }
    } else {
        let mut viewer = TreeViewer::new(source, &config);
        tree.draw(&mut viewer);
    }

    Ok(())
}
