use serde::Serialize;
use slopegraph::render::{
    LayoutOptions, SvgRenderOptions, layout_table, render_table_svg, sanitize_svg_id,
};
use slopegraph::{SlopegraphConfig, Table, build_segments};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Chart(slopegraph::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    Cell {
        row: usize,
        column: usize,
        value: String,
    },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Chart(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Csv(err) => write!(f, "CSV error: {err}"),
            CliError::Cell { row, column, value } => write!(
                f,
                "row {row}, column {column}: cannot parse {value:?} as a number (leave the cell empty or write NA for a missing value)"
            ),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<slopegraph::Error> for CliError {
    fn from(value: slopegraph::Error) -> Self {
        Self::Chart(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<csv::Error> for CliError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Segments,
    Layout,
    Render,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    json_input: bool,
    pretty: bool,
    config: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "slopegraph\n\
\n\
USAGE:\n\
  slopegraph [segments] [--json] [--pretty] [<path>|-]\n\
  slopegraph layout [--json] [--config <path>] [--pretty] [<path>|-]\n\
  slopegraph render [--json] [--config <path>] [--id <diagram-id>] [--out <path>] [<path>|-]\n\
\n\
INPUT:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - CSV (default): the header row labels the periods and the first column\n\
    names the observations. An empty cell or NA is a missing value.\n\
  - --json (implied by a path ending in .json) expects a table object:\n\
    {\"row_names\": [..], \"period_labels\": [..], \"values\": [[..]]}\n\
    (null cells are missing values; period_labels may be omitted).\n\
\n\
NOTES:\n\
  - segments prints the full segment list as JSON.\n\
  - layout prints the positioned chart (margins, scales, drawables) as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - --config points to a chart configuration JSON file.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "segments" => args.command = Command::Segments,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--json" => args.json_input = true,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                while it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn parse_cell(field: &str, row: usize, column: usize) -> Result<Option<f64>, CliError> {
    if field.is_empty() || field.eq_ignore_ascii_case("na") {
        return Ok(None);
    }
    field.parse::<f64>().map(Some).map_err(|_| CliError::Cell {
        row,
        column,
        value: field.to_string(),
    })
}

/// Header row labels the periods, first column names the observations,
/// remaining cells are values (empty or NA for missing).
fn parse_csv_table(text: &str) -> Result<Table, CliError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        return Err(CliError::Usage(
            "CSV input needs a name column plus at least one period column",
        ));
    }
    let period_labels: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut row_names = Vec::new();
    let mut values = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = Vec::with_capacity(period_labels.len());
        for (j, field) in record.iter().skip(1).enumerate() {
            row.push(parse_cell(field, i + 1, j + 1)?);
        }
        row_names.push(record.get(0).unwrap_or("").to_string());
        values.push(row);
    }

    Ok(Table::new(row_names, period_labels, values)?)
}

fn parse_table(text: &str, json_input: bool) -> Result<Table, CliError> {
    if json_input {
        Ok(serde_json::from_str(text)?)
    } else {
        parse_csv_table(text)
    }
}

fn json_path(input: Option<&str>) -> bool {
    matches!(input, Some(path) if path != "-"
        && std::path::Path::new(path)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
}

fn load_config(path: Option<&str>) -> Result<SlopegraphConfig, CliError> {
    match path {
        None => Ok(SlopegraphConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let json_input = args.json_input || json_path(args.input.as_deref());
    let table = parse_table(&text, json_input)?;
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Segments => {
            let segments = build_segments(&table)?;
            write_json(&segments, args.pretty)
        }
        Command::Layout => {
            let layout = layout_table(&table, &config, &LayoutOptions::default())?;
            write_json(&layout, args.pretty)
        }
        Command::Render => {
            let svg_options = SvgRenderOptions {
                diagram_id: args.diagram_id.as_deref().map(sanitize_svg_id),
            };
            let svg = render_table_svg(&table, &config, &LayoutOptions::default(), &svg_options)?;
            write_text(&svg, args.out.as_deref())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
