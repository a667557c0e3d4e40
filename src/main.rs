use std::process;

use clap::{App, Arg, ArgMatches};
use log::{debug, error, info};

use quadfill::export::save_png;
use quadfill::math::vec2::Vec2;
use quadfill::render::Renderer;
use quadfill::{Preset, QuadEditor, QuadMesh, RenderConfig};

const DEFAULT_OUTPUT: &str = "quadfill.png";

/// A single `--move INDEX=X,Y` request.
#[derive(Debug, Clone, Copy, PartialEq)]
struct VertexMove {
    index: usize,
    position: Vec2,
}

fn parse_move(arg: &str) -> Result<VertexMove, String> {
    let invalid = || format!("invalid move '{}', expected INDEX=X,Y", arg);

    let (index, position) = arg.split_once('=').ok_or_else(invalid)?;
    let (x, y) = position.split_once(',').ok_or_else(invalid)?;
    let index = index.trim().parse::<usize>().map_err(|_| invalid())?;
    let x = x.trim().parse::<f32>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f32>().map_err(|_| invalid())?;

    Ok(VertexMove {
        index,
        position: Vec2::new(x, y),
    })
}

fn build_config(matches: &ArgMatches, preset: Preset) -> Result<RenderConfig, String> {
    let mut config = match matches.value_of("config") {
        Some(path) => RenderConfig::load(path).map_err(|e| e.to_string())?,
        None => {
            let mut config = RenderConfig::default();
            preset.configure(&mut config);
            config
        }
    };

    if matches.is_present("no-handles") {
        config.show_handles = false;
    }
    if matches.is_present("outlines") {
        config.show_outlines = true;
    }
    debug!("{:?}", config);
    Ok(config)
}

fn run(matches: &ArgMatches) -> Result<(), String> {
    let preset = match matches.value_of("preset") {
        Some(name) => name.parse::<Preset>().map_err(|e| e.to_string())?,
        None => Preset::default(),
    };

    let mesh = match matches.value_of("scene") {
        Some(path) => QuadMesh::load(path).map_err(|e| e.to_string())?,
        None => preset.mesh(),
    };
    let config = build_config(matches, preset)?;

    let moves = matches
        .values_of("move")
        .map(|values| values.map(parse_move).collect::<Result<Vec<_>, _>>())
        .transpose()?
        .unwrap_or_default();

    let mut editor = QuadEditor::new(mesh, config);
    for m in &moves {
        editor
            .move_vertex(m.index, m.position)
            .map_err(|e| e.to_string())?;
    }

    let mut renderer = Renderer::new(editor.config().width, editor.config().height);
    editor.render(&mut renderer).map_err(|e| e.to_string())?;

    let output = matches.value_of("output").unwrap_or(DEFAULT_OUTPUT);
    save_png(&renderer, output).map_err(|e| e.to_string())?;

    if let Some(path) = matches.value_of("save-scene") {
        let mesh = editor.into_mesh();
        mesh.save(path).map_err(|e| e.to_string())?;
        info!("saved scene to {}", path);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let matches = App::new("quadfill")
        .about("Renders a quad mesh with a scanline polygon fill")
        .arg(
            Arg::with_name("preset")
                .short("p")
                .long("preset")
                .value_name("NAME")
                .help("Built-in scene to start from")
                .takes_value(true)
                .possible_values(&["grid", "diamond"]),
        )
        .arg(
            Arg::with_name("scene")
                .short("s")
                .long("scene")
                .value_name("FILE")
                .help("Load the mesh from a JSON scene file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("Load render settings from a JSON file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("move")
                .short("m")
                .long("move")
                .value_name("INDEX=X,Y")
                .help("Move a vertex before rendering")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Where to write the PNG")
                .takes_value(true)
                .default_value(DEFAULT_OUTPUT),
        )
        .arg(
            Arg::with_name("save-scene")
                .long("save-scene")
                .value_name("FILE")
                .help("Write the edited mesh as a JSON scene file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("no-handles")
                .long("no-handles")
                .help("Do not draw vertex handles"),
        )
        .arg(
            Arg::with_name("outlines")
                .long("outlines")
                .help("Draw quad outlines"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        error!("{}", e);
        eprintln!("quadfill: {}", e);
        process::exit(1);
    }
}
