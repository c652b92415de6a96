//! 时间戳与产品 ID

use rand::Rng;

/// 2024-01-01 00:00:00 UTC
const ID_EPOCH_MS: i64 = 1_704_067_200_000;
const RANDOM_BITS: u32 = 12;
const TIMESTAMP_MASK: i64 = 0x1FF_FFFF_FFFF;

/// 当前 UTC 时间戳 (毫秒)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Snowflake-style product id
///
/// 41 bits of milliseconds since [`ID_EPOCH_MS`] followed by 12 random
/// bits, so ids stay below 2^53 and survive a round trip through a
/// JavaScript frontend. Two ids minted in the same millisecond collide with
/// probability 1/4096; stores re-roll on collision.
pub fn snowflake_id() -> i64 {
    let ts = (now_millis() - ID_EPOCH_MS) & TIMESTAMP_MASK;
    let random: i64 = rand::thread_rng().gen_range(0..(1 << RANDOM_BITS));
    (ts << RANDOM_BITS) | random
}

/// Unix millis at which a [`snowflake_id`] was minted
pub fn snowflake_millis(id: i64) -> i64 {
    (id >> RANDOM_BITS) + ID_EPOCH_MS
}
