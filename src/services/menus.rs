use pushkind_common::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use serde::Deserialize;

use crate::domain::activity::{ActivityAction, NewActivity};
use crate::domain::menu::{MenuCategory, MenuListQuery, MenuView};
use crate::domain::station::Station;
use crate::forms::menus::{AddMenuCategoryForm, AddMenuForm, EditMenuForm};
use crate::repository::{MenuReader, MenuWriter};
use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Default, Deserialize)]
pub struct MenusQuery {
    pub menu_category_id: Option<i32>,
    pub search: Option<String>,
    pub page: Option<usize>,
}

/// Menu items with their derived stock status.
pub fn list_menus<R>(
    repo: &R,
    station: &Station,
    query: MenusQuery,
) -> ServiceResult<Paginated<MenuView>>
where
    R: MenuReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let mut list_query =
        MenuListQuery::new(station.location_id).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(menu_category_id) = query.menu_category_id {
        list_query = list_query.menu_category_id(menu_category_id);
    }
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|term| !term.is_empty()) {
        list_query = list_query.search(term);
    }

    let (total, menus) = repo.list_menus(list_query).map_err(ServiceError::from)?;

    Ok(Paginated::new(
        menus.into_iter().map(MenuView::from).collect(),
        page,
        total.div_ceil(DEFAULT_ITEMS_PER_PAGE),
    ))
}

pub fn create_menu<R>(repo: &R, station: &Station, form: AddMenuForm) -> ServiceResult<MenuView>
where
    R: MenuReader + MenuWriter + ?Sized,
{
    let new_menu = form
        .into_new_menu(station.location_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    ensure_menu_category(repo, station, new_menu.details.menu_category_id)?;

    let activity = NewActivity::new(station, ActivityAction::MenuAdded);
    repo.create_menu(&new_menu, &activity)
        .map(MenuView::from)
        .map_err(ServiceError::from)
}

pub fn update_menu<R>(
    repo: &R,
    station: &Station,
    menu_id: i32,
    form: EditMenuForm,
) -> ServiceResult<MenuView>
where
    R: MenuReader + MenuWriter + ?Sized,
{
    let updates = form
        .into_update_menu()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.get_menu_by_id(menu_id, station.location_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }
    ensure_menu_category(repo, station, updates.details.menu_category_id)?;

    let activity = NewActivity::new(station, ActivityAction::MenuEdited).with_subject(menu_id);
    repo.update_menu(menu_id, station.location_id, &updates, &activity)
        .map(MenuView::from)
        .map_err(ServiceError::from)
}

pub fn list_menu_categories<R>(repo: &R, station: &Station) -> ServiceResult<Vec<MenuCategory>>
where
    R: MenuReader + ?Sized,
{
    repo.list_menu_categories(station.location_id)
        .map_err(ServiceError::from)
}

pub fn create_menu_category<R>(
    repo: &R,
    station: &Station,
    form: AddMenuCategoryForm,
) -> ServiceResult<MenuCategory>
where
    R: MenuWriter + ?Sized,
{
    let new_category = form
        .into_new_menu_category(station.location_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let activity = NewActivity::new(station, ActivityAction::MenuCategoryAdded);
    repo.create_menu_category(&new_category, &activity)
        .map_err(ServiceError::from)
}

fn ensure_menu_category<R>(repo: &R, station: &Station, menu_category_id: i32) -> ServiceResult<()>
where
    R: MenuReader + ?Sized,
{
    if repo
        .get_menu_category_by_id(menu_category_id, station.location_id)?
        .is_none()
    {
        return Err(ServiceError::Form(format!(
            "menu category {menu_category_id} does not exist"
        )));
    }
    Ok(())
}
