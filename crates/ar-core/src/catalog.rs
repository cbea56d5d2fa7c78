/// Static catalog entry: a display name and where to fetch the asset from.
///
/// `source_path` is either a site-relative path (`/owl/scene.gltf`) or an
/// absolute URL; the loader resolves buffers relative to it either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub name: &'static str,
    pub source_path: &'static str,
}

impl ModelDescriptor {
    pub const fn new(name: &'static str, source_path: &'static str) -> Self {
        Self { name, source_path }
    }
}

pub const DEFAULT_CATALOG: &[ModelDescriptor] = &[
    ModelDescriptor::new("Bear", "/bear/scene.gltf"),
    ModelDescriptor::new("Elk", "/elk/scene.gltf"),
    ModelDescriptor::new("Owl", "/owl/scene.gltf"),
    ModelDescriptor::new("Panther", "/panther/scene.gltf"),
    ModelDescriptor::new("Horse", "/horse/scene.gltf"),
];

/// Index of the entry whose name matches `name`, ignoring ASCII case.
pub fn find_model(catalog: &[ModelDescriptor], name: &str) -> Option<usize> {
    let name = name.trim();
    catalog
        .iter()
        .position(|m| m.name.eq_ignore_ascii_case(name))
}
