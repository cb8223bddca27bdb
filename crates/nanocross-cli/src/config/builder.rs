use super::defaults::DefaultsConfig;
use super::file::{FileAuxFile, FileConfig, FileExportConfig};
use super::models::{AnalyzeAppConfig, GenerateAppConfig};
use crate::cli::{AnalyzeArgs, GenerateArgs};
use crate::error::{CliError, Result};
use nanocross::core::forcefield::params::ForcefieldParams;
use nanocross::core::io::lammps::{BoxSpec, LammpsOptions};
use nanocross::engine::config as core_config;
use nanocross::engine::error::EngineError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

fn load_file_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

/// Resolves the `generate` configuration.
///
/// Each value is taken from the first source that sets it: `-S KEY=VALUE`, the
/// dedicated CLI flag, the config file, then the built-in default.
pub fn build_generate_config(args: &GenerateArgs) -> Result<GenerateAppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(args.config.as_deref())?;
    let mut overrides = apply_set_values(FileConfig::default(), &args.set_values)?;

    let tubes_file = file_config.tubes.take().unwrap_or_default();
    let tubes_set = overrides.tubes.take().unwrap_or_default();
    let orient_file = file_config.orientation.take().unwrap_or_default();
    let orient_set = overrides.orientation.take().unwrap_or_default();
    let sweep_file = file_config.sweep.take().unwrap_or_default();
    let sweep_set = overrides.sweep.take().unwrap_or_default();
    let export_file = file_config.export.take().unwrap_or_default();
    let export_set = overrides.export.take().unwrap_or_default();

    let theta_degrees = orient_set
        .theta_degrees
        .or(args.theta)
        .or(orient_file.theta_degrees)
        .ok_or_else(|| {
            CliError::Config(
                "`orientation.theta-degrees` is required either in the config file or via --theta."
                    .to_string(),
            )
        })?;
    let phi_degrees = orient_set
        .phi_degrees
        .or(args.phi)
        .or(orient_file.phi_degrees)
        .ok_or_else(|| {
            CliError::Config(
                "`orientation.phi-degrees` is required either in the config file or via --phi."
                    .to_string(),
            )
        })?;

    let sweep = core_config::SweepConfigBuilder::new()
        .orientation(core_config::Orientation::from_degrees(
            theta_degrees,
            phi_degrees,
        ))
        .ring_atom_count(
            tubes_set
                .ring_atom_count
                .or(args.ring_atom_count)
                .or(tubes_file.ring_atom_count)
                .unwrap_or(defaults.ring_atom_count),
        )
        .length(
            tubes_set
                .length
                .or(args.length)
                .or(tubes_file.length)
                .unwrap_or(defaults.length),
        )
        .bond_length(
            tubes_set
                .bond_length
                .or(args.bond_length)
                .or(tubes_file.bond_length)
                .unwrap_or(defaults.bond_length),
        )
        .num_steps(
            sweep_set
                .num_steps
                .or(args.num_steps)
                .or(sweep_file.num_steps)
                .unwrap_or(defaults.num_steps),
        )
        .separation_start(
            sweep_set
                .separation_start
                .or(sweep_file.separation_start)
                .unwrap_or(defaults.separation_start),
        )
        .separation_end(
            sweep_set
                .separation_end
                .or(sweep_file.separation_end)
                .unwrap_or(defaults.separation_end),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let output_dir = sweep_set
        .output_dir
        .or_else(|| args.output.clone())
        .or(sweep_file.output_dir)
        .unwrap_or_else(|| defaults.output_dir.clone());

    let export = merge_export(export_set, export_file, &defaults)?;

    let core_config = core_config::GenerateConfigBuilder::new()
        .sweep(sweep)
        .output_dir(output_dir)
        .data_file_name(export.data_file_name)
        .export(export.options)
        .aux_files(export.aux_files)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    debug!("Resolved generate configuration: {:?}", core_config);
    Ok(GenerateAppConfig {
        theta_degrees,
        phi_degrees,
        core_config,
    })
}

struct MergedExport {
    data_file_name: String,
    options: LammpsOptions,
    aux_files: Vec<core_config::AuxFile>,
}

fn merge_export(
    set: FileExportConfig,
    file: FileExportConfig,
    defaults: &DefaultsConfig,
) -> Result<MergedExport> {
    let set_box = layer_box(&set, "-S")?;
    let file_box = layer_box(&file, "the config file")?;
    let box_spec = set_box.or(file_box).unwrap_or_default();

    let data_file_name = set
        .data_file_name
        .or(file.data_file_name)
        .unwrap_or_else(|| defaults.data_file_name.clone());

    let forcefield = match set.forcefield_path.or(file.forcefield_path) {
        Some(path) => ForcefieldParams::load(&path).map_err(EngineError::from)?,
        None => ForcefieldParams::default(),
    };

    let aux_files = file
        .aux_files
        .unwrap_or_default()
        .into_iter()
        .map(resolve_aux_file)
        .collect::<Result<Vec<_>>>()?;

    Ok(MergedExport {
        data_file_name,
        options: LammpsOptions {
            forcefield,
            box_spec,
        },
        aux_files,
    })
}

/// The box one layer asks for. A layer sets the box as a whole, so it may name a
/// half-width or a margin but not both.
fn layer_box(layer: &FileExportConfig, source: &str) -> Result<Option<BoxSpec>> {
    match (layer.box_half_width, layer.box_margin) {
        (Some(_), Some(_)) => Err(CliError::Config(format!(
            "`export.box-half-width` and `export.box-margin` are mutually exclusive (both set in {}).",
            source
        ))),
        (Some(w), None) => Ok(Some(BoxSpec::Fixed { lo: -w, hi: w })),
        (None, Some(m)) => Ok(Some(BoxSpec::Padded { margin: m })),
        (None, None) => Ok(None),
    }
}

fn resolve_aux_file(aux: FileAuxFile) -> Result<core_config::AuxFile> {
    let dest_template = match aux.dest {
        Some(dest) => dest,
        None => aux
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                CliError::Config(format!(
                    "Auxiliary file '{}' has no file name; set `dest` explicitly.",
                    aux.source.display()
                ))
            })?,
    };
    Ok(core_config::AuxFile {
        source: aux.source,
        dest_template,
    })
}

/// Resolves the `analyze` configuration: CLI flag, then config file, then default.
pub fn build_analysis_config(args: &AnalyzeArgs) -> Result<AnalyzeAppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(args.config.as_deref())?;
    let analysis_file = file_config.analysis.take().unwrap_or_default();

    let runs_dir: PathBuf = args
        .runs_dir
        .clone()
        .or(analysis_file.runs_dir)
        .unwrap_or(defaults.runs_dir);
    let table_path = args
        .output
        .clone()
        .or(analysis_file.table_name)
        .unwrap_or(defaults.table_name);

    let core_config = core_config::AnalysisConfigBuilder::new()
        .runs_dir(runs_dir)
        .table_path(table_path)
        .fix_file_name(
            analysis_file
                .fix_file_name
                .unwrap_or(defaults.fix_file_name),
        )
        .dump_file_name(
            analysis_file
                .dump_file_name
                .unwrap_or(defaults.dump_file_name),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AnalyzeAppConfig { core_config })
}

fn parse_set<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "tubes.ring-atom-count" => {
                config.tubes.get_or_insert_with(Default::default).ring_atom_count =
                    Some(parse_set(key, value_str, "integer")?);
            }
            "tubes.length" => {
                config.tubes.get_or_insert_with(Default::default).length =
                    Some(parse_set(key, value_str, "float")?);
            }
            "tubes.bond-length" => {
                config.tubes.get_or_insert_with(Default::default).bond_length =
                    Some(parse_set(key, value_str, "float")?);
            }
            "orientation.theta-degrees" => {
                config
                    .orientation
                    .get_or_insert_with(Default::default)
                    .theta_degrees = Some(parse_set(key, value_str, "float")?);
            }
            "orientation.phi-degrees" => {
                config
                    .orientation
                    .get_or_insert_with(Default::default)
                    .phi_degrees = Some(parse_set(key, value_str, "float")?);
            }
            "sweep.num-steps" => {
                config.sweep.get_or_insert_with(Default::default).num_steps =
                    Some(parse_set(key, value_str, "integer")?);
            }
            "sweep.separation-start" => {
                config
                    .sweep
                    .get_or_insert_with(Default::default)
                    .separation_start = Some(parse_set(key, value_str, "float")?);
            }
            "sweep.separation-end" => {
                config
                    .sweep
                    .get_or_insert_with(Default::default)
                    .separation_end = Some(parse_set(key, value_str, "float")?);
            }
            "sweep.output-dir" => {
                config.sweep.get_or_insert_with(Default::default).output_dir =
                    Some(PathBuf::from(value_str));
            }
            "export.data-file-name" => {
                config
                    .export
                    .get_or_insert_with(Default::default)
                    .data_file_name = Some(value_str.to_string());
            }
            "export.box-half-width" => {
                config
                    .export
                    .get_or_insert_with(Default::default)
                    .box_half_width = Some(parse_set(key, value_str, "float")?);
            }
            "export.box-margin" => {
                config.export.get_or_insert_with(Default::default).box_margin =
                    Some(parse_set(key, value_str, "float")?);
            }
            "export.forcefield-path" => {
                config
                    .export
                    .get_or_insert_with(Default::default)
                    .forcefield_path = Some(PathBuf::from(value_str));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
