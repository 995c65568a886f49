//! Collision Layers Constants
//!
//! Centralised bitmask constants для sight/bullet проверок.
//!
//! ## Архитектура:
//! - **Layers (битовая маска):** На каком слое находится коллайдер
//! - **Mask (битовая маска):** Какие слои учитывает запрос
//!
//! ## Layers:
//! - Layer 1 (0b1 = 1): Opaque (блокирует взгляд, пули проходят: стекло наоборот, дым)
//! - Layer 2 (0b10 = 2): Impassable (корпуса, стены: блокируют всё)
//! - Layer 3 (0b100 = 4): Bullet impassable (силовые поля: пули не проходят, видно насквозь)
//! - Layer 4 (0b1000 = 8): Ships (корпуса кораблей/турелей)
//!
//! Line-of-sight raycast учитывает слои из `obstructed_mask`, но игнорирует
//! коллайдеры, не пересекающиеся с `bullet_mask` (пули всё равно пролетят).

/// Layer 1: Opaque (дым, голограммы)
pub const LAYER_OPAQUE: u32 = 0b1;

/// Layer 2: Impassable (стены, астероиды)
pub const LAYER_IMPASSABLE: u32 = 0b10;

/// Layer 3: Bullet impassable (силовые поля)
pub const LAYER_BULLET_IMPASSABLE: u32 = 0b100;

/// Layer 4: Ships
pub const LAYER_SHIPS: u32 = 0b1000;

/// Default obstructed mask: что блокирует взгляд стрелка
pub const DEFAULT_OBSTRUCTED_MASK: u32 = LAYER_OPAQUE | LAYER_IMPASSABLE | LAYER_SHIPS;

/// Default bullet mask: с чем сталкиваются снаряды
pub const DEFAULT_BULLET_MASK: u32 = LAYER_IMPASSABLE | LAYER_BULLET_IMPASSABLE | LAYER_SHIPS;

/// Коллайдер блокирует sight-запрос?
///
/// Должен лежать в `obstructed_mask` (иначе луч его не видит) и пересекаться
/// с `bullet_mask` (иначе пули пролетят, и прятаться за ним бессмысленно).
pub fn blocks_sight(collider_layers: u32, obstructed_mask: u32, bullet_mask: u32) -> bool {
    collider_layers & obstructed_mask != 0 && collider_layers & bullet_mask != 0
}

/// Название слоя для debug логов
pub fn get_layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        LAYER_OPAQUE => "Opaque",
        LAYER_IMPASSABLE => "Impassable",
        LAYER_BULLET_IMPASSABLE => "BulletImpassable",
        LAYER_SHIPS => "Ships",
        _ => "Unknown",
    }
}
