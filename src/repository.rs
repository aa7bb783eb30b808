use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, IntoActiveModel, Iterable, Order, PaginatorTrait,
    PrimaryKeyToColumn, QueryFilter, QueryOrder, QuerySelect, Select, sea_query::IntoCondition,
};
use uuid::Uuid;

/// Pagination envelope for whole-table listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

impl PageMeta {
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        let limit = limit.max(1);
        Self {
            total,
            page: page.max(1),
            limit,
            total_pages: total.div_ceil(limit),
        }
    }
}

#[derive(Debug)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Result of a predicate-scoped listing: the page plus the count of all rows
/// matching the predicate.
#[derive(Debug)]
pub struct Filtered<T> {
    pub data: Vec<T>,
    pub count: u64,
}

/// Entity-agnostic data access bound to one table. Domain services hold one
/// of these per entity they touch and layer their rules on top.
///
/// The repository performs no validation and no error translation: constraint
/// violations surface as raw `DbErr` for the caller to interpret, and an
/// absent row is `Ok(None)`, never an error.
pub struct Repository<E: EntityTrait> {
    conn: DatabaseConnection,
    entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for Repository<E> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
            entity: PhantomData,
        }
    }
}

impl<E> Repository<E>
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    pub fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            entity: PhantomData,
        }
    }

    pub fn conn(&self) -> &DatabaseConnection {
        &self.conn
    }

    pub async fn find_first(&self, filter: impl IntoCondition) -> Result<Option<E::Model>, DbErr> {
        E::find().filter(filter).one(&self.conn).await
    }

    pub async fn find_many(&self, filter: impl IntoCondition) -> Result<Vec<E::Model>, DbErr> {
        E::find().filter(filter).all(&self.conn).await
    }

    /// Typed column projection: the caller builds a select with
    /// `select_only` plus the wanted columns and a row type deriving
    /// `FromQueryResult`.
    pub async fn find_many_projected<M>(
        &self,
        select: Select<E>,
        limit: u64,
    ) -> Result<Vec<M>, DbErr>
    where
        M: FromQueryResult + Send,
    {
        select.limit(limit).into_model::<M>().all(&self.conn).await
    }

    pub async fn find_many_ordered(
        &self,
        filter: impl IntoCondition,
        order_by: E::Column,
        order: Order,
    ) -> Result<Vec<E::Model>, DbErr> {
        E::find()
            .filter(filter)
            .order_by(order_by, order)
            .all(&self.conn)
            .await
    }

    /// Whole-table pagination; the total is counted without any predicate.
    /// Filtered pagination goes through [`Repository::find_all_filtered`].
    pub async fn find_all_paginated(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<Paginated<E::Model>, DbErr> {
        let page = page.max(1);
        let limit = limit.max(1);

        let data = E::find()
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.conn)
            .await?;
        let total = E::find().count(&self.conn).await?;

        Ok(Paginated {
            data,
            meta: PageMeta::new(total, page, limit),
        })
    }

    /// Pagination where the count is scoped by the same predicate as the page.
    pub async fn find_all_filtered(
        &self,
        filter: impl IntoCondition,
        limit: u64,
        page: u64,
    ) -> Result<Filtered<E::Model>, DbErr> {
        let select = E::find().filter(filter);
        self.find_all_from(select, limit, page).await
    }

    /// Paginate an arbitrary caller-built select over this table. The caller
    /// supplies joins and predicates typed against the schema, which keeps
    /// join-heavy listings (e.g. "pharmacies whose owner has this phone")
    /// out of the repository itself.
    pub async fn find_all_from(
        &self,
        select: Select<E>,
        limit: u64,
        page: u64,
    ) -> Result<Filtered<E::Model>, DbErr> {
        let page = page.max(1);
        let limit = limit.max(1);

        let count = select.clone().count(&self.conn).await?;
        let data = select
            .offset((page - 1) * limit)
            .limit(limit)
            .all(&self.conn)
            .await?;

        Ok(Filtered { data, count })
    }

    pub async fn count(&self, filter: impl IntoCondition) -> Result<u64, DbErr> {
        E::find().filter(filter).count(&self.conn).await
    }

    pub async fn count_all(&self) -> Result<u64, DbErr> {
        E::find().count(&self.conn).await
    }

    pub async fn create<A>(&self, values: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        values.insert(&self.conn).await
    }

    pub async fn create_many<A>(&self, values: Vec<A>) -> Result<Vec<E::Model>, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        let mut created = Vec::with_capacity(values.len());
        for value in values {
            created.push(value.insert(&self.conn).await?);
        }
        Ok(created)
    }

    /// Partial update of every row matching the predicate; returns the
    /// updated rows from the same statement's RETURNING clause, so the
    /// result cannot drift from the rows actually written.
    pub async fn update<A>(&self, filter: Condition, patch: A) -> Result<Vec<E::Model>, DbErr>
    where
        A: ActiveModelTrait<Entity = E>,
    {
        E::update_many()
            .set(patch)
            .filter(filter)
            .exec_with_returning(&self.conn)
            .await
    }

    /// Deletes matching rows and returns them in one statement, so callers
    /// can detect "already gone" from an empty vec without a read racing
    /// the delete.
    pub async fn delete(&self, filter: Condition) -> Result<Vec<E::Model>, DbErr> {
        E::delete_many()
            .filter(filter)
            .exec_with_returning(&self.conn)
            .await
    }

    // The by-id helpers below assume a single-column uuid primary key.

    fn id_filter(id: Uuid) -> Condition {
        let mut cond = Condition::all();
        if let Some(pk) = E::PrimaryKey::iter().next() {
            cond = cond.add(ColumnTrait::eq(&pk.into_column(), id));
        }
        cond
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<E::Model>, DbErr> {
        self.find_first(Self::id_filter(id)).await
    }

    pub async fn update_by_id<A>(&self, id: Uuid, patch: A) -> Result<Vec<E::Model>, DbErr>
    where
        A: ActiveModelTrait<Entity = E>,
    {
        self.update(Self::id_filter(id), patch).await
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<Vec<E::Model>, DbErr> {
        self.delete(Self::id_filter(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_meta_rounds_total_pages_up() {
        assert_eq!(PageMeta::new(25, 1, 10).total_pages, 3);
        assert_eq!(PageMeta::new(30, 1, 10).total_pages, 3);
        assert_eq!(PageMeta::new(1, 1, 10).total_pages, 1);
    }

    #[test]
    fn page_meta_empty_table_has_zero_pages() {
        let meta = PageMeta::new(0, 1, 10);
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.total, 0);
    }

    #[test]
    fn page_meta_clamps_degenerate_inputs() {
        let meta = PageMeta::new(5, 0, 0);
        assert_eq!(meta.page, 1);
        assert_eq!(meta.limit, 1);
        assert_eq!(meta.total_pages, 5);
    }
}
