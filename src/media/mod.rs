//! Media classification and naming: profiles, discovery, partial-download
//! detection, filename transforms and local→remote path mapping.

pub mod discovery;
pub mod partial;
pub mod path_map;
pub mod profile;
pub mod transform;

pub use discovery::{album_folder, album_groups, discover, is_disc_folder, DiscoveredFile};
pub use partial::{is_partial_download, PARTIAL_MARKER, PARTIAL_WINDOW};
pub use path_map::{map_to_remote, normalize};
pub use profile::{
    has_extension_in, ApiVariant, Grouping, MediaProfile, ServiceKind, AUDIO_EXTENSIONS,
    VIDEO_EXTENSIONS,
};
pub use transform::FilenameTransformer;
