//! Copyright (c) 2025-2026, Kirky.X
//!
//! MIT License
//!
//! `candidates` 表的SeaORM实体定义。

use crate::model::{CandidateId, CandidateRecord};
use chrono::NaiveTime;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "candidates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone_number: Option<String>,
    pub start_call_time: Option<NaiveTime>,
    pub end_call_time: Option<NaiveTime>,
    pub linked_in_profile_url: Option<String>,
    pub github_profile_url: Option<String>,
    pub comment: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CandidateRecord {
    fn from(model: Model) -> Self {
        CandidateRecord {
            id: CandidateId(model.id),
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            phone_number: model.phone_number,
            start_call_time: model.start_call_time,
            end_call_time: model.end_call_time,
            linked_in_profile_url: model.linked_in_profile_url,
            github_profile_url: model.github_profile_url,
            comment: model.comment,
        }
    }
}
