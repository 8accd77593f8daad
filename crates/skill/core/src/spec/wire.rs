//! Versioned binary record of a [`SkillSpec`].
//!
//! Layout (little-endian, lengths as LEB128 packed integers):
//!
//! | Field | Encoding |
//! |---|---|
//! | version | `u8`, must equal [`SkillConfig::SPEC_VERSION`] |
//! | identity | name |
//! | ability, projectile, area, minion class | class ref (length 0 = none) |
//! | damage, cooldown, cost, cast time, radius, speed, range, lifetime | `f32` each |
//! | summon count | `i32`, clamped on read |
//! | tags | count + names |
//! | applied effects, handlers | count + class refs |
//! | custom params | count + (name, `f32`) in ascending key order |
//!
//! Lists hold at most [`SkillConfig::MAX_WIRE_ARRAY`] elements: longer lists
//! are truncated when writing and rejected when reading. Any read failure
//! aborts the whole record.

use std::io::{self, Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use sha2::{Digest, Sha256};
use tracing::warn;

use super::SkillSpec;
use crate::class::{ClassKind, ClassRegistry};
use crate::config::SkillConfig;
use crate::error::{ErrorSeverity, SkillError};
use crate::tags::{GameplayTag, TagSet};
use crate::types::{ClassId, SkillId};

#[derive(Debug, thiserror::Error)]
pub enum WireError {
    #[error("spec version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u8, found: u8 },

    #[error("record ended before {0} was read")]
    UnexpectedEof(&'static str),

    #[error("{field} holds {len} elements (max {max})")]
    ArrayTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("tag set holds {len} tags (max {max})")]
    TooManyTags { len: usize, max: usize },

    #[error("name of {len} bytes exceeds {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("malformed packed length")]
    MalformedLength,

    #[error("name is not valid UTF-8")]
    InvalidUtf8,

    #[error("unknown class '{0}'")]
    UnknownClass(ClassId),

    #[error("class '{class}' is a {actual}, expected {expected}")]
    ClassKindMismatch {
        class: ClassId,
        expected: ClassKind,
        actual: ClassKind,
    },

    #[error("wire I/O failed: {0}")]
    Io(#[source] io::Error),
}

impl SkillError for WireError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Io(_) => ErrorSeverity::Internal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::VersionMismatch { .. } => "WIRE_VERSION_MISMATCH",
            Self::UnexpectedEof(_) => "WIRE_UNEXPECTED_EOF",
            Self::ArrayTooLong { .. } => "WIRE_ARRAY_TOO_LONG",
            Self::TooManyTags { .. } => "WIRE_TOO_MANY_TAGS",
            Self::NameTooLong { .. } => "WIRE_NAME_TOO_LONG",
            Self::MalformedLength => "WIRE_MALFORMED_LENGTH",
            Self::InvalidUtf8 => "WIRE_INVALID_UTF8",
            Self::UnknownClass(_) => "WIRE_UNKNOWN_CLASS",
            Self::ClassKindMismatch { .. } => "WIRE_CLASS_KIND_MISMATCH",
            Self::Io(_) => "WIRE_IO",
        }
    }
}

/// Serializes `spec` into a fresh buffer.
pub fn encode(spec: &SkillSpec) -> Result<Vec<u8>, WireError> {
    let mut buf = Vec::with_capacity(128);
    write_spec(&mut buf, spec)?;
    Ok(buf)
}

/// Deserializes a spec, checking every class reference against `registry`.
pub fn decode(bytes: &[u8], registry: &ClassRegistry) -> Result<SkillSpec, WireError> {
    let mut reader = Cursor::new(bytes);
    read_spec(&mut reader, registry)
}

/// SHA-256 of an encoded record.
pub fn digest(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

pub fn write_spec<W: Write>(w: &mut W, spec: &SkillSpec) -> Result<(), WireError> {
    w.write_u8(SkillConfig::SPEC_VERSION).map_err(WireError::Io)?;
    write_name(w, spec.skill_id.as_str())?;

    for class in [
        &spec.ability_class,
        &spec.projectile_class,
        &spec.area_class,
        &spec.minion_class,
    ] {
        write_name(w, class.as_ref().map_or("", ClassId::as_str))?;
    }

    for value in [
        spec.final_damage,
        spec.cooldown,
        spec.resource_cost,
        spec.cast_time,
        spec.area_radius,
        spec.projectile_speed,
        spec.max_range,
        spec.lifetime,
    ] {
        w.write_f32::<LittleEndian>(value).map_err(WireError::Io)?;
    }
    w.write_i32::<LittleEndian>(spec.summon_count)
        .map_err(WireError::Io)?;

    write_tags(w, &spec.tags)?;
    write_class_list(w, "applied_effects", &spec.applied_effects)?;
    write_class_list(w, "handlers", &spec.handlers)?;

    let params = spec.custom_params.sorted();
    let count = capped_len("custom_params", params.len());
    write_packed(w, count as u32)?;
    for param in params.into_iter().take(count) {
        write_name(w, &param.key)?;
        w.write_f32::<LittleEndian>(param.value)
            .map_err(WireError::Io)?;
    }

    Ok(())
}

pub fn read_spec<R: Read>(r: &mut R, registry: &ClassRegistry) -> Result<SkillSpec, WireError> {
    let version = r.read_u8().map_err(eof("version"))?;
    if version != SkillConfig::SPEC_VERSION {
        return Err(WireError::VersionMismatch {
            expected: SkillConfig::SPEC_VERSION,
            found: version,
        });
    }

    let mut spec = SkillSpec {
        skill_id: SkillId::new(read_name(r, "skill_id")?),
        ..SkillSpec::default()
    };
    spec.ability_class = read_class_ref(r, registry, ClassKind::Ability)?;
    spec.projectile_class = read_class_ref(r, registry, ClassKind::Projectile)?;
    spec.area_class = read_class_ref(r, registry, ClassKind::AreaEffect)?;
    spec.minion_class = read_class_ref(r, registry, ClassKind::Minion)?;

    for field in [
        &mut spec.final_damage,
        &mut spec.cooldown,
        &mut spec.resource_cost,
        &mut spec.cast_time,
        &mut spec.area_radius,
        &mut spec.projectile_speed,
        &mut spec.max_range,
        &mut spec.lifetime,
    ] {
        *field = r.read_f32::<LittleEndian>().map_err(eof("numeric field"))?;
    }
    let summon_count = r.read_i32::<LittleEndian>().map_err(eof("summon_count"))?;
    spec.summon_count = SkillConfig::clamp_summon_count(summon_count);

    spec.tags = read_tags(r)?;
    spec.applied_effects = read_class_list(r, registry, "applied_effects", ClassKind::Effect)?;
    spec.handlers = read_class_list(r, registry, "handlers", ClassKind::Handler)?;

    let count = read_list_len(r, "custom_params")?;
    for _ in 0..count {
        let key = read_name(r, "custom param key")?;
        let value = r.read_f32::<LittleEndian>().map_err(eof("custom param value"))?;
        spec.custom_params.set(key, value);
    }

    Ok(spec)
}

fn eof(what: &'static str) -> impl Fn(io::Error) -> WireError {
    move |err| match err.kind() {
        io::ErrorKind::UnexpectedEof => WireError::UnexpectedEof(what),
        _ => WireError::Io(err),
    }
}

fn capped_len(field: &'static str, len: usize) -> usize {
    if len > SkillConfig::MAX_WIRE_ARRAY {
        warn!(
            field,
            len,
            max = SkillConfig::MAX_WIRE_ARRAY,
            "truncating list in spec wire record"
        );
        SkillConfig::MAX_WIRE_ARRAY
    } else {
        len
    }
}

fn write_packed<W: Write>(w: &mut W, mut value: u32) -> Result<(), WireError> {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            w.write_u8(byte).map_err(WireError::Io)?;
            return Ok(());
        }
        w.write_u8(byte | 0x80).map_err(WireError::Io)?;
    }
}

fn read_packed<R: Read>(r: &mut R, what: &'static str) -> Result<u32, WireError> {
    let mut value: u32 = 0;
    for shift in (0..35).step_by(7) {
        let byte = r.read_u8().map_err(eof(what))?;
        let bits = u32::from(byte & 0x7f);
        if shift == 28 && bits > 0x0f {
            return Err(WireError::MalformedLength);
        }
        value |= bits << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(WireError::MalformedLength)
}

fn read_list_len<R: Read>(r: &mut R, field: &'static str) -> Result<usize, WireError> {
    let len = read_packed(r, field)? as usize;
    if len > SkillConfig::MAX_WIRE_ARRAY {
        return Err(WireError::ArrayTooLong {
            field,
            len,
            max: SkillConfig::MAX_WIRE_ARRAY,
        });
    }
    Ok(len)
}

fn write_name<W: Write>(w: &mut W, name: &str) -> Result<(), WireError> {
    let len = name.len();
    if len > SkillConfig::MAX_NAME_LEN {
        return Err(WireError::NameTooLong {
            len,
            max: SkillConfig::MAX_NAME_LEN,
        });
    }
    write_packed(w, len as u32)?;
    w.write_all(name.as_bytes()).map_err(WireError::Io)
}

fn read_name<R: Read>(r: &mut R, what: &'static str) -> Result<String, WireError> {
    let len = read_packed(r, what)? as usize;
    if len > SkillConfig::MAX_NAME_LEN {
        return Err(WireError::NameTooLong {
            len,
            max: SkillConfig::MAX_NAME_LEN,
        });
    }
    let mut bytes = vec![0; len];
    r.read_exact(&mut bytes).map_err(eof(what))?;
    String::from_utf8(bytes).map_err(|_| WireError::InvalidUtf8)
}

fn read_class_ref<R: Read>(
    r: &mut R,
    registry: &ClassRegistry,
    expected: ClassKind,
) -> Result<Option<ClassId>, WireError> {
    let name = read_name(r, "class reference")?;
    if name.is_empty() {
        return Ok(None);
    }
    checked_class(registry, ClassId::new(name), expected).map(Some)
}

fn checked_class(
    registry: &ClassRegistry,
    class: ClassId,
    expected: ClassKind,
) -> Result<ClassId, WireError> {
    match registry.kind_of(&class) {
        None => Err(WireError::UnknownClass(class)),
        Some(actual) if actual != expected => Err(WireError::ClassKindMismatch {
            class,
            expected,
            actual,
        }),
        Some(_) => Ok(class),
    }
}

fn write_class_list<W: Write>(
    w: &mut W,
    field: &'static str,
    classes: &[ClassId],
) -> Result<(), WireError> {
    let count = capped_len(field, classes.len());
    write_packed(w, count as u32)?;
    for class in classes.iter().take(count) {
        write_name(w, class.as_str())?;
    }
    Ok(())
}

fn read_class_list<R: Read>(
    r: &mut R,
    registry: &ClassRegistry,
    field: &'static str,
    expected: ClassKind,
) -> Result<Vec<ClassId>, WireError> {
    let count = read_list_len(r, field)?;
    let mut classes = Vec::with_capacity(count);
    for _ in 0..count {
        let name = read_name(r, field)?;
        classes.push(checked_class(registry, ClassId::new(name), expected)?);
    }
    Ok(classes)
}

fn write_tags<W: Write>(w: &mut W, tags: &TagSet) -> Result<(), WireError> {
    if tags.len() > TagSet::MAX_WIRE_TAGS {
        return Err(WireError::TooManyTags {
            len: tags.len(),
            max: TagSet::MAX_WIRE_TAGS,
        });
    }
    write_packed(w, tags.len() as u32)?;
    for tag in tags.iter() {
        write_name(w, tag.as_str())?;
    }
    Ok(())
}

fn read_tags<R: Read>(r: &mut R) -> Result<TagSet, WireError> {
    let len = read_packed(r, "tags")? as usize;
    if len > TagSet::MAX_WIRE_TAGS {
        return Err(WireError::TooManyTags {
            len,
            max: TagSet::MAX_WIRE_TAGS,
        });
    }
    let mut tags = TagSet::new();
    for _ in 0..len {
        tags.insert(GameplayTag::new(read_name(r, "tag")?));
    }
    Ok(tags)
}
