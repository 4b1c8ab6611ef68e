pub(crate) mod fuzzy;
pub mod geo;
pub mod shape;
pub mod time;

pub use geo::*;
pub use time::*;

pub trait Named {
    fn name(&self) -> &str;
}

/// Picks the entry whose name is closest to `needle`. Ties go to the earlier
/// entry, so upstream ranking wins when names score the same.
pub fn best_match<'a, T>(needle: &str, haystack: &'a [T]) -> Option<&'a T>
where
    T: Named,
{
    haystack
        .iter()
        .map(|hay| (hay, fuzzy::score(needle, hay.name())))
        .fold(None, |best: Option<(&T, f64)>, (hay, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((hay, score)),
        })
        .map(|(entity, _)| entity)
}
