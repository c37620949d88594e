//! Plotgeom - render bioinformatics charts from TSV tables.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use plotgeom::color::{Color, Palette};
use plotgeom::data::{read_table, ClusterFrame, Distance, Group, HCluster, Linkage, Table};
use plotgeom::export::write_svg;
use plotgeom::props::{BarProps, HeatmapProps, ScatterProps, VolcanoProps};
use plotgeom::render::{BarData, ScatterData};
use plotgeom::ui::{self, ChartSource, Viewer};
use plotgeom::PlotError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChartKind {
    /// Clustered heatmap of every numeric column
    Heatmap,
    /// Dot plot; needs --percent
    Dot,
    /// Scatter plot of --x against --y
    Scatter,
    /// Volcano plot: --x is the fold change, --y the significance
    Volcano,
    /// Horizontal bars of --x per row
    Bar,
}

/// A column group given as `NAME=COLOR:TERM[,TERM...]`.
#[derive(Debug, Clone)]
struct GroupSpec {
    name: String,
    color: Color,
    terms: Vec<String>,
}

fn parse_group(s: &str) -> std::result::Result<GroupSpec, String> {
    let (name, rest) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=COLOR:TERMS, got '{}'", s))?;
    let (color, terms) = rest
        .split_once(':')
        .ok_or_else(|| format!("expected COLOR:TERMS after '=', got '{}'", rest))?;
    let color = color.parse::<Color>().map_err(|e| e.to_string())?;

    Ok(GroupSpec {
        name: name.trim().to_string(),
        color,
        terms: terms.split(',').map(|t| t.trim().to_string()).collect(),
    })
}

#[derive(Parser, Debug)]
#[command(name = "plotgeom")]
#[command(about = "Render heatmaps, dot plots, scatter, volcano and bar charts from TSV tables", long_about = None)]
struct Args {
    /// Tab-separated table: header row, row names in the first column
    file: PathBuf,

    /// Chart to draw
    #[arg(short, long, value_enum, default_value_t = ChartKind::Heatmap)]
    chart: ChartKind,

    /// Write an SVG file instead of opening the terminal preview
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Column for the x axis (bar values); defaults to the first column
    #[arg(short, long)]
    x: Option<String>,

    /// Column for the y axis; defaults to the second column
    #[arg(short, long)]
    y: Option<String>,

    /// Column mapped through the palette
    #[arg(long)]
    hue: Option<String>,

    /// Column of marker radii
    #[arg(long)]
    size: Option<String>,

    /// Percent matrix for dot plots, fractions in [0, 1]
    #[arg(long)]
    percent: Option<PathBuf>,

    /// Heatmap color range
    #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
    range: Option<Vec<f64>>,

    /// Color palette
    #[arg(long, value_enum)]
    palette: Option<Palette>,

    /// Display scale factor
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Column group as NAME=COLOR:TERM[,TERM...], matched against column names
    #[arg(long = "group", value_parser = parse_group)]
    groups: Vec<GroupSpec>,

    /// Cluster rows and draw the row dendrogram
    #[arg(long)]
    cluster_rows: bool,

    /// Cluster columns and draw the column dendrogram
    #[arg(long)]
    cluster_cols: bool,

    /// Cluster linkage
    #[arg(long, value_enum, default_value_t)]
    linkage: Linkage,

    /// Cluster distance
    #[arg(long, value_enum, default_value_t)]
    distance: Distance,

    /// Row names to label on scatter and volcano plots
    #[arg(long = "label")]
    labels: Vec<String>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn column_or(table: &Table, name: &Option<String>, fallback: usize) -> Result<String> {
    match name {
        Some(n) => Ok(n.clone()),
        None => table
            .columns()
            .get(fallback)
            .cloned()
            .with_context(|| format!("table has no column {}", fallback + 1)),
    }
}

fn grid_source(args: &Args, table: &Table) -> Result<ChartSource> {
    let main = table.to_matrix()?;
    let clusterer = HCluster::new(args.linkage, args.distance);

    let mut frame = ClusterFrame::new(main.clone());
    if let Some(path) = &args.percent {
        frame = frame.with_percent(read_table(path)?.to_matrix()?)?;
    }
    if args.cluster_rows {
        frame = frame.with_row_tree(clusterer.run(&main)?)?;
    }
    if args.cluster_cols {
        frame = frame.with_col_tree(clusterer.run(&main.transpose())?)?;
    }

    let groups = args
        .groups
        .iter()
        .map(|g| Group::from_search(g.name.clone(), g.color, &g.terms, main.col_names()))
        .collect();

    let mut props = HeatmapProps {
        scale: args.scale,
        ..HeatmapProps::default()
    };
    if let Some(r) = &args.range {
        props.range = (r[0], r[1]);
    }

    Ok(match args.chart {
        ChartKind::Dot => ChartSource::DotPlot {
            frame,
            groups,
            props,
        },
        _ => ChartSource::Heatmap {
            frame,
            groups,
            props,
        },
    })
}

fn point_data(args: &Args, table: &Table) -> Result<ScatterData> {
    let x = column_or(table, &args.x, 0)?;
    let y = column_or(table, &args.y, 1)?;

    let mut data = ScatterData::new(
        table.row_names().to_vec(),
        x.as_str(),
        table.numeric_column(&x)?,
        y.as_str(),
        table.numeric_column(&y)?,
    )?;
    if let Some(hue) = &args.hue {
        data = data.with_hue(table.numeric_column(hue)?)?;
    }
    if let Some(size) = &args.size {
        data = data.with_size(table.numeric_column(size)?)?;
    }
    Ok(data)
}

fn build_source(args: &Args) -> Result<ChartSource> {
    if !args.scale.is_finite() || args.scale <= 0.0 {
        bail!("--scale must be positive, got {}", args.scale);
    }

    let table = read_table(&args.file)?;
    tracing::info!(
        "Read {} rows x {} columns from {}",
        table.rows(),
        table.columns().len(),
        args.file.display()
    );

    let mut source = match args.chart {
        ChartKind::Heatmap | ChartKind::Dot => grid_source(args, &table)?,
        ChartKind::Scatter => {
            let mut props = ScatterProps {
                scale: args.scale,
                ..ScatterProps::default()
            };
            props.labels.values = args.labels.clone();
            ChartSource::Scatter {
                data: point_data(args, &table)?,
                props,
            }
        }
        ChartKind::Volcano => {
            let mut props = VolcanoProps::default();
            props.scatter.scale = args.scale;
            props.scatter.labels.values = args.labels.clone();
            ChartSource::Volcano {
                data: point_data(args, &table)?,
                props,
            }
        }
        ChartKind::Bar => {
            let x = column_or(&table, &args.x, 0)?;
            let mut data = BarData::new(
                table.row_names().to_vec(),
                x.as_str(),
                table.numeric_column(&x)?,
            )?;
            if let Some(hue) = &args.hue {
                data = data.with_hue(table.numeric_column(hue)?)?;
            }
            ChartSource::Bar {
                data,
                props: BarProps {
                    scale: args.scale,
                    ..BarProps::default()
                },
            }
        }
    };

    if let Some(palette) = args.palette {
        source.set_palette(palette);
    }
    Ok(source)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .map_err(|e| PlotError::file_open(log_path.clone(), e))?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting plotgeom");
    }

    let source = build_source(&args)?;

    if let Some(path) = &args.svg {
        let chart = source.render()?;
        write_svg(&chart, path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let viewer = Viewer::new(source, args.palette.unwrap_or_default())?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, viewer);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("plotgeom exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut viewer: Viewer,
) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, &mut viewer))
            .map_err(|e| PlotError::Terminal(e.to_string()))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Char('q')) | (KeyModifiers::NONE, KeyCode::Esc) => {
                    return Ok(())
                }
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(()),
                (KeyModifiers::NONE, KeyCode::Char('c')) => {
                    if let Err(e) = viewer.cycle_palette() {
                        viewer.status = format!("Render failed: {}", e);
                    }
                }
                (KeyModifiers::SHIFT, KeyCode::Char('T')) => viewer.cycle_theme(),
                _ => {}
            },
            Event::Mouse(mouse) => {
                if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
                    viewer.hover(mouse.column, mouse.row);
                }
            }
            _ => {}
        }
    }
}
