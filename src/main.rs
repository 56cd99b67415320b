//! # Vitae CLI
//!
//! Usage:
//!   vitae request.json -o resume.html
//!   echo '{ ... }' | vitae --json
//!   vitae --example > request.json

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use vitae::{render::HtmlRenderer, PaginationRequest, Result};

#[derive(Parser)]
#[command(name = "vitae")]
#[command(version)]
#[command(about = "Paginate a resume into A4 pages from measured block heights", long_about = None)]
struct Cli {
    /// Request JSON (stdin if not given)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not given)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Override the request's theme
    #[arg(short, long)]
    theme: Option<String>,

    /// Print the page partition as JSON instead of HTML
    #[arg(long)]
    json: bool,

    /// Print an example request and exit
    #[arg(long)]
    example: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.example {
        print!("{}", example_request_json());
        return ExitCode::SUCCESS;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut request = PaginationRequest::from_json(&input)?;
    if let Some(theme) = &cli.theme {
        request.theme = Some(theme.clone());
    }
    let theme = request.theme()?;
    let pagination = request.run()?;

    let rendered = if cli.json {
        serde_json::to_string_pretty(&pagination.summary())?
    } else {
        HtmlRenderer::new(request.geometry).render_document(&pagination, theme)
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered)?;
            eprintln!(
                "✓ {} page(s), {} bytes written to {}",
                pagination.total_pages(),
                rendered.len(),
                path.display()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn example_request_json() -> &'static str {
    r##"{
  "theme": "classic",
  "document": {
    "fullName": "Ada Lovelace",
    "title": "Analytical Engine Programmer",
    "email": "ada@example.com",
    "phone": "+44 20 7946 0000",
    "location": "London",
    "website": "https://ada.example.com",
    "linkedin": "linkedin.com/in/ada",
    "github": "github.com/ada",
    "summary": "Mathematician who wrote the first published algorithm intended for a machine.",
    "experience": [
      {
        "id": "1",
        "company": "Analytical Engine Project",
        "title": "Programmer",
        "location": "London",
        "startDate": "1842",
        "endDate": "1843",
        "description": [
          "Translated and annotated Menabrea's paper on the engine.",
          "Wrote Note G, a method for computing Bernoulli numbers."
        ]
      }
    ],
    "education": [
      {
        "id": "1",
        "institution": "Private tutoring",
        "degree": "Mathematics and Logic",
        "startDate": "1829",
        "endDate": "1835"
      }
    ],
    "skills": [
      { "name": "Mathematics", "items": [
        { "name": "Analysis", "level": 5 },
        { "name": "Probability", "level": 4 }
      ] },
      { "name": "Languages", "items": ["French", "Italian"] }
    ],
    "languages": [
      { "id": "1", "language": "English", "proficiency": "Native" },
      { "id": "2", "language": "French", "proficiency": "Fluent" }
    ],
    "interests": "Poetical science, horses, music",
    "customSections": [
      {
        "id": "custom-pubs",
        "title": "Publications",
        "items": [
          {
            "id": "1",
            "title": "Sketch of the Analytical Engine",
            "subtitle": "Scientific Memoirs",
            "date": "1843",
            "description": ["With notes by the translator."]
          }
        ]
      }
    ],
    "sectionOrder": [
      "summary", "experience", "education", "skills",
      "languages", "interests", "custom-pubs"
    ]
  }
}
"##
}
