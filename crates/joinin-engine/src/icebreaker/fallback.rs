//! Deterministic fallback icebreakers.

use joinin_entity::session::Category;

/// Build the fallback icebreaker for an activity.
///
/// Each template directly references the activity text so the message is
/// never generic. This function cannot fail; it is the floor the injector
/// lands on whenever the external generator does not deliver.
pub fn fallback_icebreaker(activity: &str, category: Category) -> String {
    match category {
        Category::Study => format!(
            "✨ Welcome! Ask the group what part of \"{activity}\" they're tackling — teamwork makes it click!"
        ),
        Category::Food => format!(
            "✨ Welcome! Ask everyone what they're ordering — \"{activity}\" is better with recommendations!"
        ),
        Category::Sports => format!(
            "✨ Welcome! Ask who's winning or if they need one more for \"{activity}\"!"
        ),
        Category::Chill => format!(
            "✨ Welcome! Just say hi — \"{activity}\" is all about good vibes and new friends!"
        ),
        Category::Research => format!(
            "✨ Welcome! Ask what papers or datasets everyone is using for \"{activity}\"!"
        ),
        Category::Coding => format!(
            "✨ Welcome! Ask what tech stack everyone is using for \"{activity}\" — great way to learn!"
        ),
        Category::Gaming => format!(
            "✨ Welcome! Ask if anyone needs a teammate for \"{activity}\" — let's go!"
        ),
        Category::Events => format!(
            "✨ Welcome! Ask what's coming up next at \"{activity}\" — don't miss anything!"
        ),
    }
}
