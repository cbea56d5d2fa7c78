use crate::bounds::BoundingBox;
use crate::error::LoadError;
use base64::Engine as _;
use glam::{Mat3, Mat4, Vec3};

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub batches: Vec<DrawBatch>,
    pub bounds: BoundingBox,
}

/// A run of `indices` sharing one base-color image (glTF image index).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawBatch {
    pub first_index: u32,
    pub index_count: u32,
    pub image: Option<usize>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Images referenced by at least one batch, ascending.
    pub fn used_images(&self) -> Vec<usize> {
        let mut used: Vec<usize> = self.batches.iter().filter_map(|b| b.image).collect();
        used.sort_unstable();
        used.dedup();
        used
    }

    fn push_batch(&mut self, first_index: u32, index_count: u32, image: Option<usize>) {
        if index_count == 0 {
            return;
        }
        if let Some(last) = self.batches.last_mut() {
            if last.image == image && last.first_index + last.index_count == first_index {
                last.index_count += index_count;
                return;
            }
        }
        self.batches.push(DrawBatch {
            first_index,
            index_count,
            image,
        });
    }
}

/// Where the bytes for one glTF buffer come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BufferSource {
    /// The binary chunk of a `.glb` container.
    Blob,
    Inline(Vec<u8>),
    /// Already resolved against the model URL.
    External(String),
}

/// Where the encoded bytes for one glTF image come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    View(usize),
    Inline(Vec<u8>),
    External(String),
}

pub fn plan_buffers(doc: &gltf::Document, base_url: &str) -> Result<Vec<BufferSource>, LoadError> {
    doc.buffers()
        .map(|buffer| match buffer.source() {
            gltf::buffer::Source::Bin => Ok(BufferSource::Blob),
            gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                decode_data_uri(uri).map(BufferSource::Inline)
            }
            gltf::buffer::Source::Uri(uri) => Ok(BufferSource::External(resolve_uri(base_url, uri))),
        })
        .collect()
}

pub fn plan_images(
    doc: &gltf::Document,
    base_url: &str,
) -> Result<Vec<ImageSource>, LoadError> {
    doc.images()
        .map(|image| match image.source() {
            gltf::image::Source::View { view, .. } => Ok(ImageSource::View(view.index())),
            gltf::image::Source::Uri { uri, .. } if uri.starts_with("data:") => {
                decode_data_uri(uri).map(ImageSource::Inline)
            }
            gltf::image::Source::Uri { uri, .. } => {
                Ok(ImageSource::External(resolve_uri(base_url, uri)))
            }
        })
        .collect()
}

/// Copy the bytes of buffer view `view` out of the loaded buffers.
pub fn view_bytes(
    doc: &gltf::Document,
    view: usize,
    buffers: &[Vec<u8>],
) -> Result<Vec<u8>, LoadError> {
    let v = doc.views().nth(view).ok_or(LoadError::MissingView(view))?;
    let data = buffers
        .get(v.buffer().index())
        .ok_or(LoadError::MissingBuffer(v.buffer().index()))?;
    data.get(v.offset()..v.offset() + v.length())
        .map(<[u8]>::to_vec)
        .ok_or(LoadError::MissingView(view))
}

/// Decode a base64 `data:` URI payload.
pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, LoadError> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| LoadError::DataUri("missing data: prefix".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::DataUri("missing ',' separator".into()))?;
    if !header.ends_with(";base64") {
        return Err(LoadError::DataUri(format!("unsupported encoding {header:?}")));
    }
    base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| LoadError::DataUri(e.to_string()))
}

/// Resolve `relative` against the URL of the file that referenced it.
/// Absolute URLs, site-rooted paths and data URIs pass through unchanged.
pub fn resolve_uri(base_url: &str, relative: &str) -> String {
    if relative.contains("://") || relative.starts_with('/') || relative.starts_with("data:") {
        return relative.to_string();
    }
    let base = base_url.split(['?', '#']).next().unwrap_or(base_url);
    match base.rfind('/') {
        Some(i) => format!("{}{}", &base[..=i], relative),
        None => relative.to_string(),
    }
}

/// Flatten every triangle primitive reachable from the default scene, with
/// node transforms baked into positions and normals.
pub fn extract_mesh(doc: &gltf::Document, buffers: &[Vec<u8>]) -> Result<MeshData, LoadError> {
    if let Some(missing) = doc
        .buffers()
        .find(|b| buffers.get(b.index()).map_or(true, |data| data.len() < b.length()))
    {
        return Err(LoadError::MissingBuffer(missing.index()));
    }

    let mut out = MeshData {
        bounds: BoundingBox::empty(),
        ..Default::default()
    };

    match doc.default_scene().or_else(|| doc.scenes().next()) {
        Some(scene) => {
            for node in scene.nodes() {
                visit_node(&node, Mat4::IDENTITY, buffers, &mut out)?;
            }
        }
        None => {
            // Scene-less files: draw each mesh untransformed.
            for mesh in doc.meshes() {
                append_mesh(&mesh, Mat4::IDENTITY, buffers, &mut out)?;
            }
        }
    }

    if out.indices.is_empty() {
        return Err(LoadError::NoGeometry);
    }
    Ok(out)
}

fn visit_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[Vec<u8>],
    out: &mut MeshData,
) -> Result<(), LoadError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        append_mesh(&mesh, world, buffers, out)?;
    }
    for child in node.children() {
        visit_node(&child, world, buffers, out)?;
    }
    Ok(())
}

fn append_mesh(
    mesh: &gltf::Mesh,
    world: Mat4,
    buffers: &[Vec<u8>],
    out: &mut MeshData,
) -> Result<(), LoadError> {
    let normal_matrix = normal_matrix(&world);
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "[mesh] skipping primitive {} of mesh {} with mode {:?}",
                primitive.index(),
                mesh.index(),
                primitive.mode()
            );
            continue;
        }
        let reader = primitive.reader(|b| buffers.get(b.index()).map(|v| v.as_slice()));
        let Some(positions) = reader.read_positions() else {
            continue;
        };
        let positions: Vec<Vec3> = positions
            .map(|p| world.transform_point3(Vec3::from(p)))
            .collect();
        if positions.is_empty() {
            continue;
        }

        let base = out.positions.len() as u32;
        let vcount = positions.len() as u32;
        let indices: Vec<u32> = match reader.read_indices() {
            Some(ix) => ix.into_u32().collect(),
            None => (0..vcount).collect(),
        };
        let indices: Vec<u32> = indices
            .chunks_exact(3)
            .filter(|t| t.iter().all(|&i| i < vcount))
            .flatten()
            .copied()
            .collect();

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(ns) => ns
                .map(|n| (normal_matrix * Vec3::from(n)).normalize_or_zero())
                .collect(),
            None => face_normals(&positions, &indices),
        };

        let pbr = primitive.material().pbr_metallic_roughness();
        let base_color = pbr.base_color_factor();
        let texture = pbr.base_color_texture();
        let image = texture.as_ref().map(|info| info.texture().source().index());
        let uvs: Vec<[f32; 2]> = reader
            .read_tex_coords(texture.as_ref().map_or(0, |info| info.tex_coord()))
            .map(|tc| tc.into_f32().collect())
            .unwrap_or_default();
        let colors: Vec<[f32; 4]> = match reader.read_colors(0) {
            Some(cs) => cs
                .into_rgba_f32()
                .map(|c| {
                    [
                        c[0] * base_color[0],
                        c[1] * base_color[1],
                        c[2] * base_color[2],
                        c[3] * base_color[3],
                    ]
                })
                .collect(),
            None => vec![base_color; positions.len()],
        };

        for (i, p) in positions.iter().enumerate() {
            out.bounds.expand_to_include(*p);
            out.positions.push(p.to_array());
            out.normals
                .push(normals.get(i).copied().unwrap_or(Vec3::Y).to_array());
            out.colors.push(colors.get(i).copied().unwrap_or(base_color));
            out.uvs.push(uvs.get(i).copied().unwrap_or([0.0, 0.0]));
        }
        let first_index = out.indices.len() as u32;
        out.indices.extend(indices.iter().map(|i| i + base));
        out.push_batch(first_index, indices.len() as u32, image);
    }
    Ok(())
}

fn normal_matrix(world: &Mat4) -> Mat3 {
    let m = Mat3::from_mat4(*world);
    if m.determinant().abs() <= f32::EPSILON {
        return Mat3::IDENTITY;
    }
    m.inverse().transpose()
}

// area-weighted
fn face_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for t in indices.chunks_exact(3) {
        let (a, b, c) = (t[0] as usize, t[1] as usize, t[2] as usize);
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        acc[a] += n;
        acc[b] += n;
        acc[c] += n;
    }
    acc.into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO {
                Vec3::Y
            } else {
                n
            }
        })
        .collect()
}
