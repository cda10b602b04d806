/// Points for every tick survived (distance travelled).
pub const TICK_REWARD: u32 = 1;
/// Bonus for destroying the CPU bike.
pub const WIN_BONUS: u32 = 100;

/// Score after `ticks` ticks of a round that started with `carried` points.
pub fn calculate_score(carried: u32, ticks: u32, won: bool) -> u32 {
    let mut score = carried.saturating_add(ticks.saturating_mul(TICK_REWARD));
    if won {
        score = score.saturating_add(WIN_BONUS);
    }
    score
}
