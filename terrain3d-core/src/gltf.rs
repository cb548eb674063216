//! glTF 1.0 binary (glb) container emitter, the inner half of spec
//! §4.H. Patches the embedded base template (see [`base_gltf_template`])
//! with per-tile accessor/bufferView/buffer metadata, then wraps the
//! patched JSON and the mesh's packed binary body in the 20-byte glb
//! header.

use byteorder::{LittleEndian, WriteBytesExt};
use serde_json::Value;

use crate::error::ConfigError;
use crate::mesh::TileMesh;

const BASE_TEMPLATE: &str = include_str!("base_gltf.json");

/// Parse the embedded base glTF template. Called once at
/// [`crate::TerrainGenerator`] construction time; a failure here means
/// a corrupted build, not a caller mistake.
pub fn base_gltf_template() -> Result<Value, ConfigError> {
    serde_json::from_str(BASE_TEMPLATE).map_err(ConfigError::TemplateParse)
}

fn pack_buffer(mesh: &TileMesh) -> Vec<u8> {
    let vertex_count = mesh.positions.len();
    let index_bytes = mesh.indices.len() * 2;
    let attr_bytes = vertex_count * (3 * 4 + 3 * 4 + 2 * 4);
    let mut buffer = Vec::with_capacity(index_bytes + attr_bytes);

    for &index in &mesh.indices {
        buffer.write_u16::<LittleEndian>(index).unwrap();
    }
    for p in &mesh.positions {
        for component in p {
            buffer.write_f32::<LittleEndian>(*component).unwrap();
        }
    }
    for n in &mesh.normals {
        for component in n {
            buffer.write_f32::<LittleEndian>(*component).unwrap();
        }
    }
    for uv in &mesh.uvs {
        for component in uv {
            buffer.write_f32::<LittleEndian>(*component).unwrap();
        }
    }
    buffer
}

/// Clone `template`, patch it with `mesh`'s accessor/bufferView/buffer
/// metadata per spec §4.H, and return the patched JSON alongside the
/// packed binary buffer it now describes.
fn patch_template(template: &Value, mesh: &TileMesh) -> (Value, Vec<u8>) {
    let mut doc = template.clone();
    let vertex_count = mesh.positions.len() as u64;
    let index_count = mesh.indices.len() as u64;

    let index_bytes = index_count * 2;
    let attr_bytes = vertex_count * (3 * 4 + 3 * 4 + 2 * 4);
    let total_buffer_length = index_bytes + attr_bytes;

    let accessors = doc["accessors"].as_object_mut().expect("base template has accessors");
    accessors["accessor_ind"]["count"] = Value::from(index_count);
    accessors["accessor_ind"]["byteOffset"] = Value::from(0u64);

    accessors["accessor_pos"]["count"] = Value::from(vertex_count);
    accessors["accessor_pos"]["byteOffset"] = Value::from(0u64);
    accessors["accessor_pos"]["min"] = Value::from(vec![mesh.min[0] as f64, mesh.min[1] as f64, mesh.min[2] as f64]);
    accessors["accessor_pos"]["max"] = Value::from(vec![mesh.max[0] as f64, mesh.max[1] as f64, mesh.max[2] as f64]);

    accessors["accessor_nor"]["count"] = Value::from(vertex_count);
    accessors["accessor_nor"]["byteOffset"] = Value::from(3 * 4 * vertex_count);

    accessors["accessor_uv"]["count"] = Value::from(vertex_count);
    accessors["accessor_uv"]["byteOffset"] = Value::from(6 * 4 * vertex_count);

    let buffer_views = doc["bufferViews"].as_object_mut().expect("base template has bufferViews");
    buffer_views["bufferView_ind"]["byteLength"] = Value::from(index_bytes);
    buffer_views["bufferView_ind"]["byteOffset"] = Value::from(0u64);

    buffer_views["bufferViews_attr"]["byteLength"] = Value::from(attr_bytes);
    buffer_views["bufferViews_attr"]["byteOffset"] = Value::from(index_bytes);

    doc["buffers"]["binary_glTF"]["byteLength"] = Value::from(total_buffer_length);

    (doc, pack_buffer(mesh))
}

/// Build the glTF 1.0 binary (glb) container for `mesh` against the
/// generator's parsed base `template`.
pub fn build_glb(template: &Value, mesh: &TileMesh) -> Vec<u8> {
    let (patched, buffer) = patch_template(template, mesh);
    let mut json_bytes = serde_json::to_vec(&patched).expect("patched template is always serializable");
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    let content_length = json_bytes.len() as u32;
    let glb_length = 20 + content_length + buffer.len() as u32;

    let mut out = Vec::with_capacity(glb_length as usize);
    out.extend_from_slice(b"glTF");
    out.write_u32::<LittleEndian>(1).unwrap();
    out.write_u32::<LittleEndian>(glb_length).unwrap();
    out.write_u32::<LittleEndian>(content_length).unwrap();
    out.write_u32::<LittleEndian>(0).unwrap();
    out.extend_from_slice(&json_bytes);
    out.extend_from_slice(&buffer);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Hemisphere;
    use crate::ellipsoid::Ellipsoid;

    #[test]
    fn base_template_parses() {
        base_gltf_template().unwrap();
    }

    #[test]
    fn s6_buffer_length_is_336_bytes() {
        let ellipsoid = Ellipsoid::new(1.0, 1.0, 1.0);
        let mesh = crate::mesh::build(Hemisphere::West, 0, &ellipsoid, 0.5, 1.0, 1).unwrap();
        let template = base_gltf_template().unwrap();
        let (_patched, buffer) = patch_template(&template, &mesh);
        assert_eq!(buffer.len(), 336);
    }

    #[test]
    fn glb_header_is_well_formed() {
        let ellipsoid = Ellipsoid::new(1.0, 1.0, 1.0);
        let mesh = crate::mesh::build(Hemisphere::West, 0, &ellipsoid, 0.5, 1.0, 1).unwrap();
        let template = base_gltf_template().unwrap();
        let glb = build_glb(&template, &mesh);

        assert_eq!(&glb[0..4], b"glTF");
        let version = u32::from_le_bytes(glb[4..8].try_into().unwrap());
        assert_eq!(version, 1);
        let length = u32::from_le_bytes(glb[8..12].try_into().unwrap());
        assert_eq!(length as usize, glb.len());
        let content_length = u32::from_le_bytes(glb[12..16].try_into().unwrap());
        assert_eq!(content_length % 4, 0);
        let content_format = u32::from_le_bytes(glb[16..20].try_into().unwrap());
        assert_eq!(content_format, 0);
        assert_eq!(glb.len(), 20 + content_length as usize + 336);
    }
}
