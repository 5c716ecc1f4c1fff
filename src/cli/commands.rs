use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use generational_arena::Index;
use tracing::{debug, instrument};

use crate::arena::{FsTree, NodeData};
use crate::builder::TreeBuilder;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{self, Settings};
use crate::render;
use crate::report;
use crate::sketch::SketchParser;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Demo => _demo(),
        Commands::Show { dir } => _show(cli, dir),
        Commands::Tree { dir } => _tree(cli, dir),
        Commands::Delete { dir } => _delete(cli, dir),
        Commands::Leaves { dir } => _leaves(cli, dir),
        Commands::Size { dir } => _size(cli, dir),
        Commands::Sketch { file, render } => _sketch(file, *render),
        Commands::Config { command } => match command {
            ConfigCommands::Show => _config_show(),
            ConfigCommands::Path => _config_path(),
        },
        Commands::Completion { shell } => _completion(*shell),
    }
}

/// Expand `~` in user-supplied paths.
fn expand(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Layered settings for a scan, with CLI flags applied on top.
fn effective_settings(cli: &Cli, scan_dir: &Path) -> CliResult<Settings> {
    let mut settings = Settings::load(Some(scan_dir))?;
    if cli.hidden {
        settings.show_hidden = true;
    }
    if let Some(depth) = cli.max_depth {
        settings.max_depth = Some(depth);
    }
    Ok(settings)
}

fn mirror(cli: &Cli, raw_dir: &str) -> CliResult<(FsTree, Index)> {
    let dir = expand(raw_dir);
    debug!("mirroring {:?}", dir);
    let settings = effective_settings(cli, &dir)?;
    let builder = TreeBuilder::new(settings);
    Ok(builder.build_from_path(&dir)?)
}

/// The canonical sample: a folder holding two files and a sub-folder with
/// one file, the smallest shape that exercises every traversal case.
fn sample_tree() -> CliResult<(FsTree, Index)> {
    let mut tree = FsTree::new();
    let docs = tree.insert_node(NodeData::folder("docs"));
    let invoice = tree.insert_node(NodeData::file("invoice.pdf", 8432));
    let notes = tree.insert_node(NodeData::file("notes.md", 512));
    let img = tree.insert_node(NodeData::folder("img"));
    let logo = tree.insert_node(NodeData::file("logo.png", 2048));
    tree.add_child(docs, invoice)?;
    tree.add_child(docs, notes)?;
    tree.add_child(docs, img)?;
    tree.add_child(img, logo)?;
    Ok((tree, docs))
}

#[instrument]
fn _demo() -> CliResult<()> {
    let (tree, root) = sample_tree()?;

    output::header("Show report:");
    for line in report::show(&tree, root)? {
        output::info(&line);
    }

    println!();
    output::header("Rendering:");
    print!("{}", render::to_tree_string(&tree, root)?);

    println!();
    output::header("Delete report:");
    for line in report::delete(&tree, root)? {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _show(cli: &Cli, dir: &str) -> CliResult<()> {
    let (tree, root) = mirror(cli, dir)?;
    for line in report::show(&tree, root)? {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli, dir: &str) -> CliResult<()> {
    let (tree, root) = mirror(cli, dir)?;
    print!("{}", render::to_tree_string(&tree, root)?);
    Ok(())
}

#[instrument(skip(cli))]
fn _delete(cli: &Cli, dir: &str) -> CliResult<()> {
    let (tree, root) = mirror(cli, dir)?;
    for line in report::delete(&tree, root)? {
        output::info(&line);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _leaves(cli: &Cli, dir: &str) -> CliResult<()> {
    let (tree, root) = mirror(cli, dir)?;
    for path in report::leaf_paths(&tree, root)? {
        output::info(&path);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _size(cli: &Cli, dir: &str) -> CliResult<()> {
    let (tree, root) = mirror(cli, dir)?;
    let total = report::total_size(&tree, root)?;
    let count = report::count_nodes(&tree, root)?;
    output::info(&format!("Total size: {} B", total));
    output::info(&format!("Nodes: {}", count));
    Ok(())
}

#[instrument]
fn _sketch(file: &str, render_tree: bool) -> CliResult<()> {
    let path = expand(file);
    let parser = SketchParser::new();
    let (tree, root) = parser.parse_file(&path)?;
    if render_tree {
        print!("{}", render::to_tree_string(&tree, root)?);
    } else {
        for line in report::show(&tree, root)? {
            output::info(&line);
        }
    }
    Ok(())
}

#[instrument]
fn _config_show() -> CliResult<()> {
    let settings = Settings::load(None)?;
    print!("{}", settings.to_toml()?);
    Ok(())
}

#[instrument]
fn _config_path() -> CliResult<()> {
    let global = config::global_config_path().ok_or(CliError::NoConfigDir)?;
    output::info(&format!("Global: {}", global.display()));
    output::info(&"Local:  <scan-dir>/.fstree.toml");
    Ok(())
}

#[instrument]
fn _completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
