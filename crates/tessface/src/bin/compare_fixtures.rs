//! Decode JSON tessellation fixtures and compare against their expected
//! index meshes.
//!
//! Each fixture file holds the shared index buffers, the packed face records
//! and, per face, either the expected decoded arrays or the expected error
//! kind.
//!
//! Run: `cargo run -p tessface --features test-tools --bin compare_fixtures -- <fixtures_dir>`

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tessface::decode::{DecodeOptions, DecodedMesh, FormatError, UsedEntities};
use tessface::{Error, FaceTessellation, Tessellation, index_mesh_for_face};

fn main() {
    let args: Vec<String> = env::args().collect();
    let fixtures_dir = args.get(1).map_or_else(
        || Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures"),
        PathBuf::from,
    );

    println!("Fixtures: {}\n", fixtures_dir.display());

    let fixtures = match list_fixtures(&fixtures_dir) {
        Ok(fixtures) => fixtures,
        Err(e) => {
            eprintln!("Failed to list fixtures: {e}");
            std::process::exit(1);
        }
    };

    let mut all_passed = true;
    for path in &fixtures {
        println!("--- {} ---", path.display());
        if let Err(e) = compare_fixture(path) {
            println!("FAILED: {e}");
            all_passed = false;
        } else {
            println!("PASSED\n");
        }
    }

    if all_passed {
        println!("All {} fixture(s) PASSED!", fixtures.len());
    } else {
        println!("Some fixtures FAILED!");
        std::process::exit(1);
    }
}

fn list_fixtures(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("failed to read {}: {e}", dir.display()))?;
    let mut fixtures: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    fixtures.sort();
    Ok(fixtures)
}

fn compare_fixture(path: &Path) -> Result<(), String> {
    let json = read_json(path)?;

    let triangulated_indices = u32_array("triangulated_indices", &json["triangulated_indices"])?;
    let wire_indices = u32_array("wire_indices", &json["wire_indices"])?;
    let face_values = json["faces"].as_array().ok_or("missing faces")?;

    let faces = face_values
        .iter()
        .enumerate()
        .map(|(i, face)| parse_face(&format!("faces[{i}]"), face))
        .collect::<Result<Vec<_>, _>>()?;
    let tess = Tessellation::default().with_faces(faces, triangulated_indices, wire_indices);

    for (i, face) in face_values.iter().enumerate() {
        let prefix = format!("faces[{i}]");
        let options = parse_options(&face["options"]);
        let decoded = index_mesh_for_face(&tess, i, &options);

        match (&face["expected_error"], decoded) {
            (Value::String(kind), Ok(_)) => {
                return Err(format!("{prefix}: expected {kind} error, decoded a mesh"));
            }
            (Value::String(kind), Err(e)) => compare_error(&prefix, kind, &e)?,
            (_, Ok(mesh)) => compare_mesh(&prefix, &face["expected"], &mesh)?,
            (_, Err(e)) => return Err(format!("{prefix}: unexpected error: {e}")),
        }
    }

    Ok(())
}

fn parse_face(prefix: &str, face: &Value) -> Result<FaceTessellation, String> {
    let mask = face["used_entities"]
        .as_u64()
        .and_then(|mask| u16::try_from(mask).ok())
        .ok_or(format!("{prefix}: missing or invalid used_entities"))?;
    Ok(FaceTessellation {
        used_entities: UsedEntities::from_bits_retain(mask),
        triangulated_sizes: u32_array(
            &format!("{prefix}.triangulated_sizes"),
            &face["triangulated_sizes"],
        )?,
        texture_channels: optional_u32(&face["texture_channels"]).unwrap_or(0),
        triangulated_start: optional_usize(&face["triangulated_start"]).unwrap_or(0),
        wire_sizes: u32_array(&format!("{prefix}.wire_sizes"), &face["wire_sizes"])?,
        wire_start: optional_usize(&face["wire_start"]).unwrap_or(0),
    })
}

fn parse_options(options: &Value) -> DecodeOptions {
    let mut parsed = DecodeOptions::new()
        .with_close_unterminated_loops(options["close_unterminated_loops"].as_bool() == Some(true));
    if let Some(channels) = optional_u32(&options["expected_texture_channels"]) {
        parsed = parsed.with_expected_texture_channels(channels);
    }
    parsed
}

fn compare_error(prefix: &str, expected: &str, error: &Error) -> Result<(), String> {
    let Error::Format { source, .. } = error else {
        return Err(format!("{prefix}: expected {expected} error, got: {error}"));
    };
    let kind = match source {
        FormatError::TruncatedBuffer { .. } => "TruncatedBuffer",
        FormatError::TruncatedSizes { .. } => "TruncatedSizes",
        FormatError::UnterminatedLoop { .. } => "UnterminatedLoop",
        FormatError::InconsistentChannelCount { .. } => "InconsistentChannelCount",
    };
    if kind != expected {
        return Err(format!(
            "{prefix}: error mismatch: expected={expected}, got={kind} ({source})"
        ));
    }
    println!("  {prefix}: {kind}");
    Ok(())
}

fn compare_mesh(prefix: &str, expected: &Value, mesh: &DecodedMesh) -> Result<(), String> {
    if expected.is_null() {
        return Err(format!("{prefix}: missing expected"));
    }

    for (field, actual) in [
        ("vertices", mesh.vertices()),
        ("normals", mesh.normals()),
        ("textures", mesh.textures()),
    ] {
        let name = format!("{prefix}.{field}");
        let wanted = if expected[field].is_null() {
            Vec::new()
        } else {
            u32_array(&name, &expected[field])?
        };
        compare_u32_array(&name, actual, &wanted)?;
    }

    let wanted_loops = match &expected["loops"] {
        Value::Null => Vec::new(),
        loops => loops
            .as_array()
            .ok_or(format!("{prefix}.loops: not an array"))?
            .clone(),
    };
    if wanted_loops.len() != mesh.loops().len() {
        return Err(format!(
            "{prefix}.loops: count mismatch: expected={}, decoded={}",
            wanted_loops.len(),
            mesh.loops().len()
        ));
    }
    for (l, (wanted, actual)) in wanted_loops.iter().zip(mesh.loops()).enumerate() {
        let edges = wanted
            .as_array()
            .ok_or(format!("{prefix}.loops[{l}]: not an array"))?;
        if edges.len() != actual.edges.len() {
            return Err(format!(
                "{prefix}.loops[{l}]: edge count mismatch: expected={}, decoded={}",
                edges.len(),
                actual.edges.len()
            ));
        }
        for (e, (wanted, actual)) in edges.iter().zip(&actual.edges).enumerate() {
            let name = format!("{prefix}.loops[{l}].edges[{e}]");
            let vertices = u32_array(&name, &wanted["vertices"])?;
            compare_u32_array(&format!("{name}.vertices"), &actual.vertices, &vertices)?;
            let visible = wanted["visible"].as_bool().unwrap_or(true);
            if visible != actual.visible {
                return Err(format!(
                    "{name}.visible: mismatch: expected={visible}, decoded={}",
                    actual.visible
                ));
            }
        }
    }
    println!("  {prefix}.loops: {} loop(s) match", mesh.loops().len());

    Ok(())
}

fn compare_u32_array(name: &str, actual: &[u32], expected: &[u32]) -> Result<(), String> {
    if actual.len() != expected.len() {
        return Err(format!(
            "{name}: length mismatch: expected={}, decoded={}",
            expected.len(),
            actual.len()
        ));
    }

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        if a != e {
            return Err(format!("{name}[{i}]: mismatch: expected={e}, decoded={a}"));
        }
    }

    println!("  {name}: {len} values match", len = actual.len());
    Ok(())
}

fn u32_array(name: &str, value: &Value) -> Result<Vec<u32>, String> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    value
        .as_array()
        .ok_or(format!("{name}: not an array"))?
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or(format!("{name}[{i}]: invalid value"))
        })
        .collect()
}

fn optional_u32(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|v| u32::try_from(v).ok())
}

fn optional_usize(value: &Value) -> Option<usize> {
    value.as_u64().and_then(|v| usize::try_from(v).ok())
}

fn read_json(path: &Path) -> Result<Value, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}
