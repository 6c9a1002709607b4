use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::category::{Category, CategoryListQuery};
use crate::domain::station::Station;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the categories listing.
#[derive(Debug, Default, Deserialize)]
pub struct CategoriesQuery {
    pub search: Option<String>,
    /// 1-based page number.
    pub page: Option<usize>,
    #[serde(default)]
    pub include_inactive: bool,
}

pub fn list_categories<R>(
    repo: &R,
    station: &Station,
    query: CategoriesQuery,
) -> ServiceResult<Paginated<Category>>
where
    R: CategoryReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query =
        CategoryListQuery::new(station.location_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(term) = query.search.as_deref().filter(|term| !term.trim().is_empty()) {
        list_query = list_query.search(term.trim());
    }
    if query.include_inactive {
        list_query = list_query.include_inactive();
    }

    let (total, categories) = repo.list_categories(list_query).map_err(ServiceError::from)?;

    Ok(Paginated::new(
        categories,
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

/// Creates a new category at the station's location.
pub fn create_category<R>(
    repo: &R,
    station: &Station,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    let new_category = form
        .into_new_category(station.location_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

pub fn update_category<R>(
    repo: &R,
    station: &Station,
    category_id: i32,
    form: EditCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter + ?Sized,
{
    let update = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo
        .get_category_by_id(category_id, station.location_id)?
        .is_none()
    {
        return Err(ServiceError::NotFound);
    }

    repo.update_category(category_id, station.location_id, &update)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::sync::SyncStatus;
    use crate::repository::mock::MockCategoryRepo;

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2024, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    fn station() -> Station {
        Station::new(9, "Tester")
    }

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id,
            location_id: 9,
            name: name.to_string(),
            description: None,
            is_active: true,
            sync_status: SyncStatus::Pending,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn list_categories_scopes_and_paginates() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_list_categories()
            .times(1)
            .returning(|query| {
                assert_eq!(query.location_id, 9);
                assert_eq!(query.search.as_deref(), Some("dry"));
                assert!(!query.include_inactive);
                Ok((1, vec![sample_category(1, "Dry Goods")]))
            });

        let query = CategoriesQuery {
            search: Some(" dry ".to_string()),
            page: None,
            include_inactive: false,
        };

        let page = list_categories(&repo, &station(), query).expect("expected success");

        let serialized = serde_json::to_value(&page).expect("serialization failed");
        assert_eq!(serialized["page"].as_u64(), Some(1));
        assert_eq!(serialized["items"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn create_category_validates_form() {
        let repo = MockCategoryRepo::new();
        let form = AddCategoryForm {
            name: "   ".to_string(),
            description: None,
        };

        let result = create_category(&repo, &station(), form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn create_category_persists_new_entry() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_create_category()
            .times(1)
            .withf(|new_category| {
                assert_eq!(new_category.location_id, 9);
                assert_eq!(new_category.name, "Fresh Produce");
                true
            })
            .returning(|_| Ok(sample_category(10, "Fresh Produce")));

        let form = AddCategoryForm {
            name: "  Fresh   Produce ".to_string(),
            description: Some(" seasonal goods ".to_string()),
        };

        let created = create_category(&repo, &station(), form).expect("expected success");

        assert_eq!(created.id, 10);
    }

    #[test]
    fn update_category_reports_missing_category() {
        let mut repo = MockCategoryRepo::new();
        repo.expect_get_category_by_id().returning(|_, _| Ok(None));
        repo.expect_update_category().never();

        let form = EditCategoryForm {
            name: "Dry Goods".to_string(),
            description: None,
            is_active: true,
        };

        let result = update_category(&repo, &station(), 3, form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
