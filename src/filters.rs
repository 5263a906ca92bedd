//! Query-string filter for the product catalog.
//!
//! Keys follow the `<field>__<lookup>` convention: `price__gt`, `price__lt`,
//! `date__gt`, `date__lt`, `active`, `category`. Every key is optional and
//! the present ones are combined with AND.

use chrono::NaiveDate;
use sea_orm::{ColumnTrait, Condition, QueryFilter};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::entity::products::Column;

#[derive(Debug, Default, Clone, PartialEq, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductFilter {
    /// Price strictly greater than.
    #[serde(rename = "price__gt")]
    pub price_gt: Option<i64>,
    /// Price strictly less than.
    #[serde(rename = "price__lt")]
    pub price_lt: Option<i64>,
    /// Date strictly after (`YYYY-MM-DD`).
    #[serde(rename = "date__gt")]
    pub date_gt: Option<NaiveDate>,
    /// Date strictly before (`YYYY-MM-DD`).
    #[serde(rename = "date__lt")]
    pub date_lt: Option<NaiveDate>,
    pub active: Option<bool>,
    /// Category id.
    pub category: Option<i32>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(price) = self.price_gt {
            condition = condition.add(Column::Price.gt(price));
        }
        if let Some(price) = self.price_lt {
            condition = condition.add(Column::Price.lt(price));
        }
        if let Some(date) = self.date_gt {
            condition = condition.add(Column::Date.gt(date));
        }
        if let Some(date) = self.date_lt {
            condition = condition.add(Column::Date.lt(date));
        }
        if let Some(active) = self.active {
            condition = condition.add(Column::Active.eq(active));
        }
        if let Some(category) = self.category {
            condition = condition.add(Column::CategoryId.eq(category));
        }

        condition
    }

    /// Narrow `query` by this filter. An empty filter leaves the query
    /// without a `WHERE` clause.
    pub fn apply<Q: QueryFilter>(&self, query: Q) -> Q {
        if self.is_empty() {
            return query;
        }
        query.filter(self.condition())
    }
}
