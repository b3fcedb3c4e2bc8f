use crate::model::task::{Status, Task};

/// The visible subset of tasks for one column under a search query.
///
/// Pure projection: a task is visible when its status matches the column
/// and the query occurs case-insensitively in its title or description.
/// An empty (or all-whitespace) query matches everything. Insertion order
/// is preserved.
pub fn visible<'a, I>(tasks: I, status: Status, query: &str) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let q = query.trim().to_lowercase();
    tasks
        .into_iter()
        .filter(|t| {
            t.status == status
                && (q.is_empty()
                    || t.title.to_lowercase().contains(&q)
                    || t.desc.to_lowercase().contains(&q))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, desc: &str, status: Status) -> Task {
        Task {
            id: title.to_lowercase(),
            title: title.into(),
            desc: desc.into(),
            due: None,
            prio: Default::default(),
            status,
            created_at: 0,
        }
    }

    fn titles<'a>(tasks: &[&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn empty_query_shows_the_whole_column() {
        let tasks = vec![
            task("Alpha", "", Status::Todo),
            task("Beta", "", Status::Done),
            task("Gamma", "", Status::Todo),
        ];
        let shown = visible(&tasks, Status::Todo, "");
        assert_eq!(titles(&shown), ["Alpha", "Gamma"]);
    }

    #[test]
    fn query_matches_title_case_insensitively() {
        let tasks = vec![
            task("Alpha", "", Status::Todo),
            task("Beta", "", Status::Done),
        ];
        assert_eq!(titles(&visible(&tasks, Status::Todo, "alp")), ["Alpha"]);
        assert_eq!(titles(&visible(&tasks, Status::Todo, "ALP")), ["Alpha"]);
        assert!(visible(&tasks, Status::Done, "alp").is_empty());
    }

    #[test]
    fn query_matches_description_too() {
        let tasks = vec![
            task("Report", "gather apple sales", Status::Done),
            task("Memo", "pear sales", Status::Done),
        ];
        assert_eq!(titles(&visible(&tasks, Status::Done, "Apple")), ["Report"]);
    }

    #[test]
    fn whitespace_query_is_treated_as_empty() {
        let tasks = vec![task("Alpha", "", Status::Todo)];
        assert_eq!(visible(&tasks, Status::Todo, "   ").len(), 1);
    }

    #[test]
    fn order_is_insertion_order() {
        let tasks = vec![
            task("Zebra plan", "", Status::Todo),
            task("Apple plan", "", Status::Todo),
            task("Mango plan", "", Status::Todo),
        ];
        let shown = visible(&tasks, Status::Todo, "plan");
        assert_eq!(titles(&shown), ["Zebra plan", "Apple plan", "Mango plan"]);
    }
}
