//! Serializable operations and a single entry point that runs them.
//!
//! An [`Operation`] is one query or update with its parameters, tagged by
//! `"operation"`:
//!
//! ```json
//! {"operation": "complex1", "personId": 1, "firstName": "Bob", "limit": 5}
//! ```
//!
//! Complex queries without a `limit` use [`DEFAULT_LIMITS`].

use crate::complex::{self, DEFAULT_LIMITS};
use crate::short::{self, DEFAULT_MESSAGE_LIMIT};
use crate::update::{
    self, AddComment, AddForum, AddFriendship, AddLike, AddMembership, AddPerson, AddPost,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snb_graph::{Database, Result};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "operation",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum Operation {
    Complex1 {
        person_id: i64,
        first_name: String,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex2 {
        person_id: i64,
        max_date: i64,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex3 {
        person_id: i64,
        country_x: String,
        country_y: String,
        start_date: i64,
        duration_days: i64,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex4 {
        person_id: i64,
        start_date: i64,
        duration_days: i64,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex5 {
        person_id: i64,
        min_date: i64,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex6 {
        person_id: i64,
        tag_name: String,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex7 {
        person_id: i64,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex8 {
        person_id: i64,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex9 {
        person_id: i64,
        max_date: i64,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex10 {
        person_id: i64,
        month: u32,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex11 {
        person_id: i64,
        country_name: String,
        work_from_year: i32,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex12 {
        person_id: i64,
        tag_class_name: String,
        #[serde(default)]
        limit: Option<usize>,
    },
    Complex13 {
        person1_id: i64,
        person2_id: i64,
    },
    Complex14 {
        person1_id: i64,
        person2_id: i64,
    },
    Short1 {
        person_id: i64,
    },
    Short2 {
        person_id: i64,
        #[serde(default)]
        limit: Option<usize>,
    },
    Short3 {
        person_id: i64,
    },
    Short4 {
        message_id: i64,
    },
    Short5 {
        message_id: i64,
    },
    Short6 {
        message_id: i64,
    },
    Short7 {
        message_id: i64,
    },
    Update1(AddPerson),
    Update2(AddLike),
    Update3(AddLike),
    Update4(AddForum),
    Update5(AddMembership),
    Update6(AddPost),
    Update7(AddComment),
    Update8(AddFriendship),
}

impl Operation {
    /// The tag this operation serializes under, e.g. `"complex3"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Complex1 { .. } => "complex1",
            Self::Complex2 { .. } => "complex2",
            Self::Complex3 { .. } => "complex3",
            Self::Complex4 { .. } => "complex4",
            Self::Complex5 { .. } => "complex5",
            Self::Complex6 { .. } => "complex6",
            Self::Complex7 { .. } => "complex7",
            Self::Complex8 { .. } => "complex8",
            Self::Complex9 { .. } => "complex9",
            Self::Complex10 { .. } => "complex10",
            Self::Complex11 { .. } => "complex11",
            Self::Complex12 { .. } => "complex12",
            Self::Complex13 { .. } => "complex13",
            Self::Complex14 { .. } => "complex14",
            Self::Short1 { .. } => "short1",
            Self::Short2 { .. } => "short2",
            Self::Short3 { .. } => "short3",
            Self::Short4 { .. } => "short4",
            Self::Short5 { .. } => "short5",
            Self::Short6 { .. } => "short6",
            Self::Short7 { .. } => "short7",
            Self::Update1(_) => "update1",
            Self::Update2(_) => "update2",
            Self::Update3(_) => "update3",
            Self::Update4(_) => "update4",
            Self::Update5(_) => "update5",
            Self::Update6(_) => "update6",
            Self::Update7(_) => "update7",
            Self::Update8(_) => "update8",
        }
    }

    pub fn is_update(&self) -> bool {
        self.name().starts_with("update")
    }
}

/// What an operation produced: the number of rows and the rows themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    pub count: usize,
    pub value: Value,
}

impl OperationResult {
    fn rows<T: Serialize>(rows: Vec<T>) -> Result<Self> {
        Ok(Self {
            count: rows.len(),
            value: serde_json::to_value(rows)?,
        })
    }

    fn single<T: Serialize>(row: Option<T>) -> Result<Self> {
        Ok(Self {
            count: usize::from(row.is_some()),
            value: serde_json::to_value(row)?,
        })
    }

    fn empty() -> Self {
        Self {
            count: 0,
            value: Value::Null,
        }
    }
}

fn limit_for(query: usize, limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMITS[query - 1])
}

/// Runs one operation against the database.
pub fn execute(db: &Database, operation: &Operation) -> Result<OperationResult> {
    let result = match operation {
        Operation::Complex1 {
            person_id,
            first_name,
            limit,
        } => OperationResult::rows(complex::friends_by_name(
            db,
            *person_id,
            first_name,
            limit_for(1, *limit),
        )?)?,
        Operation::Complex2 {
            person_id,
            max_date,
            limit,
        } => OperationResult::rows(complex::recent_friend_messages(
            db,
            *person_id,
            *max_date,
            limit_for(2, *limit),
        )?)?,
        Operation::Complex3 {
            person_id,
            country_x,
            country_y,
            start_date,
            duration_days,
            limit,
        } => OperationResult::rows(complex::friends_in_countries(
            db,
            *person_id,
            country_x,
            country_y,
            *start_date,
            *duration_days,
            limit_for(3, *limit),
        )?)?,
        Operation::Complex4 {
            person_id,
            start_date,
            duration_days,
            limit,
        } => OperationResult::rows(complex::new_topics(
            db,
            *person_id,
            *start_date,
            *duration_days,
            limit_for(4, *limit),
        )?)?,
        Operation::Complex5 {
            person_id,
            min_date,
            limit,
        } => OperationResult::rows(complex::new_groups(
            db,
            *person_id,
            *min_date,
            limit_for(5, *limit),
        )?)?,
        Operation::Complex6 {
            person_id,
            tag_name,
            limit,
        } => OperationResult::rows(complex::tag_cooccurrence(
            db,
            *person_id,
            tag_name,
            limit_for(6, *limit),
        )?)?,
        Operation::Complex7 { person_id, limit } => OperationResult::rows(
            complex::recent_likers(db, *person_id, limit_for(7, *limit))?,
        )?,
        Operation::Complex8 { person_id, limit } => OperationResult::rows(
            complex::recent_replies(db, *person_id, limit_for(8, *limit))?,
        )?,
        Operation::Complex9 {
            person_id,
            max_date,
            limit,
        } => OperationResult::rows(complex::recent_circle_messages(
            db,
            *person_id,
            *max_date,
            limit_for(9, *limit),
        )?)?,
        Operation::Complex10 {
            person_id,
            month,
            limit,
        } => OperationResult::rows(complex::friend_recommendation(
            db,
            *person_id,
            *month,
            limit_for(10, *limit),
        )?)?,
        Operation::Complex11 {
            person_id,
            country_name,
            work_from_year,
            limit,
        } => OperationResult::rows(complex::job_referral(
            db,
            *person_id,
            country_name,
            *work_from_year,
            limit_for(11, *limit),
        )?)?,
        Operation::Complex12 {
            person_id,
            tag_class_name,
            limit,
        } => OperationResult::rows(complex::expert_search(
            db,
            *person_id,
            tag_class_name,
            limit_for(12, *limit),
        )?)?,
        Operation::Complex13 {
            person1_id,
            person2_id,
        } => OperationResult::single(complex::shortest_path(db, *person1_id, *person2_id)?)?,
        Operation::Complex14 {
            person1_id,
            person2_id,
        } => OperationResult::rows(complex::weighted_paths(db, *person1_id, *person2_id)?)?,
        Operation::Short1 { person_id } => {
            OperationResult::single(short::person_profile(db, *person_id)?)?
        }
        Operation::Short2 { person_id, limit } => OperationResult::rows(
            short::person_recent_messages(
                db,
                *person_id,
                limit.unwrap_or(DEFAULT_MESSAGE_LIMIT),
            )?,
        )?,
        Operation::Short3 { person_id } => {
            OperationResult::rows(short::person_friends(db, *person_id)?)?
        }
        Operation::Short4 { message_id } => {
            OperationResult::single(short::message_content(db, *message_id)?)?
        }
        Operation::Short5 { message_id } => {
            OperationResult::single(short::message_creator(db, *message_id)?)?
        }
        Operation::Short6 { message_id } => {
            OperationResult::single(short::message_forum(db, *message_id)?)?
        }
        Operation::Short7 { message_id } => {
            OperationResult::rows(short::message_replies(db, *message_id)?)?
        }
        Operation::Update1(params) => {
            update::add_person(db, params)?;
            OperationResult::empty()
        }
        Operation::Update2(params) => {
            update::add_post_like(db, params)?;
            OperationResult::empty()
        }
        Operation::Update3(params) => {
            update::add_comment_like(db, params)?;
            OperationResult::empty()
        }
        Operation::Update4(params) => {
            update::add_forum(db, params)?;
            OperationResult::empty()
        }
        Operation::Update5(params) => {
            update::add_forum_membership(db, params)?;
            OperationResult::empty()
        }
        Operation::Update6(params) => {
            update::add_post(db, params)?;
            OperationResult::empty()
        }
        Operation::Update7(params) => {
            update::add_comment(db, params)?;
            OperationResult::empty()
        }
        Operation::Update8(params) => {
            update::add_friendship(db, params)?;
            OperationResult::empty()
        }
    };

    debug!(operation = operation.name(), count = result.count, "executed");
    Ok(result)
}
