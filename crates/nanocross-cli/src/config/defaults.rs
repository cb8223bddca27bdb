use nanocross::core::forcefield::params::CC_BOND_LENGTH;
use nanocross::engine::config as core_config;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub ring_atom_count: usize,
    pub length: f64,
    pub bond_length: f64,
    pub num_steps: usize,
    pub separation_start: f64,
    pub separation_end: f64,
    pub output_dir: PathBuf,
    pub data_file_name: String,
    pub runs_dir: PathBuf,
    pub fix_file_name: String,
    pub dump_file_name: String,
    pub table_name: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            ring_atom_count: core_config::DEFAULT_RING_ATOM_COUNT,
            length: core_config::DEFAULT_TUBE_LENGTH,
            bond_length: CC_BOND_LENGTH,
            num_steps: core_config::DEFAULT_NUM_STEPS,
            separation_start: core_config::DEFAULT_SEPARATION_START,
            separation_end: core_config::DEFAULT_SEPARATION_END,
            output_dir: PathBuf::from("sims"),
            data_file_name: core_config::DEFAULT_DATA_FILE_NAME.to_string(),
            runs_dir: PathBuf::from("sims"),
            fix_file_name: core_config::DEFAULT_FIX_FILE_NAME.to_string(),
            dump_file_name: core_config::DEFAULT_DUMP_FILE_NAME.to_string(),
            table_name: PathBuf::from("cnt_potential_table.data"),
        }
    }
}
