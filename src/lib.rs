#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod search;
pub mod view;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use dataset::{DatasetError, parse_dataset};
pub use ir::{Dataset, Gender, LifeStatus, Marriage, ParentChild, Person};
pub use layout::{Layout, PositionedNode, TreeNode, build_graph, compute_layout};
pub use search::search_nodes;
pub use view::{ViewState, couple_key};
