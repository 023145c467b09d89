use thiserror::Error;

use crate::ir::CourseId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("prerequisite cycle through courses {}", format_ids(.cycle))]
    CyclicGraph { cycle: Vec<CourseId> },

    #[error("row assignment did not converge after {passes} passes")]
    NotConverged { passes: usize },

    #[error("course {0} is not part of the current layout")]
    UnknownNode(CourseId),

    #[error("unknown career {0}")]
    UnknownCareer(u32),

    #[error("unknown profile {0}")]
    UnknownProfile(u32),

    #[error("profile {profile} does not belong to career {career}")]
    ProfileOutsideCareer { profile: u32, career: u32 },

    #[error("duplicate course id {0} in catalog")]
    DuplicateCourse(CourseId),
}

fn format_ids(ids: &[CourseId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_message_lists_path() {
        let err = LayoutError::CyclicGraph {
            cycle: vec![3, 7, 3],
        };
        assert_eq!(err.to_string(), "prerequisite cycle through courses 3 -> 7 -> 3");
    }
}
