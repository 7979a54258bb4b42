use super::CategoryError;
use crate::model::{
    effective_slug, ChildCategory, ChildCategoryCreate, ChildCategoryId, ChildCategoryUpdate,
    ParentCategory, ParentCategoryCreate, ParentCategoryId, ParentCategoryUpdate,
};
use async_trait::async_trait;
use resource_store::{ActorEntity, NoAction, ResourceClient};

#[async_trait]
impl ActorEntity for ParentCategory {
    type Id = ParentCategoryId;
    type Create = ParentCategoryCreate;
    type Update = ParentCategoryUpdate;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ();
    type Error = CategoryError;

    fn from_create_params(id: ParentCategoryId, params: ParentCategoryCreate) -> Result<Self, CategoryError> {
        Ok(Self {
            id,
            slug: effective_slug(params.slug.as_deref(), &params.name),
            name: params.name.trim().to_string(),
        })
    }

    async fn on_update(&mut self, update: ParentCategoryUpdate, _ctx: &()) -> Result<(), CategoryError> {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(slug) = update.slug.filter(|s| !s.is_empty()) {
            self.slug = slug;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &()) -> Result<(), CategoryError> {
        match action {}
    }
}

async fn check_parent(
    parents: &ResourceClient<ParentCategory>,
    id: ParentCategoryId,
) -> Result<(), CategoryError> {
    match parents.get(id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(CategoryError::UnknownParent(id)),
        Err(e) => Err(CategoryError::Repository(e.to_string())),
    }
}

#[async_trait]
impl ActorEntity for ChildCategory {
    type Id = ChildCategoryId;
    type Create = ChildCategoryCreate;
    type Update = ChildCategoryUpdate;
    type Action = NoAction;
    type ActionResult = ();
    type Context = ResourceClient<ParentCategory>;
    type Error = CategoryError;

    fn from_create_params(id: ChildCategoryId, params: ChildCategoryCreate) -> Result<Self, CategoryError> {
        Ok(Self {
            id,
            parent_category_id: params.parent_category_id,
            slug: effective_slug(params.slug.as_deref(), &params.name),
            name: params.name.trim().to_string(),
        })
    }

    async fn on_create(&mut self, parents: &Self::Context) -> Result<(), CategoryError> {
        check_parent(parents, self.parent_category_id).await
    }

    async fn on_update(&mut self, update: ChildCategoryUpdate, parents: &Self::Context) -> Result<(), CategoryError> {
        if let Some(parent) = update.parent_category_id {
            check_parent(parents, parent).await?;
            self.parent_category_id = parent;
        }
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(slug) = update.slug.filter(|s| !s.is_empty()) {
            self.slug = slug;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: NoAction, _ctx: &Self::Context) -> Result<(), CategoryError> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_store::ResourceActor;

    #[tokio::test]
    async fn test_child_requires_parent_and_derives_slug() {
        let (parent_actor, parents) = ResourceActor::<ParentCategory>::new(8);
        let (child_actor, children) = ResourceActor::<ChildCategory>::new(8);
        tokio::spawn(parent_actor.run(()));
        tokio::spawn(child_actor.run(parents.clone()));

        let orphan = children
            .create(ChildCategoryCreate {
                parent_category_id: ParentCategoryId(9),
                name: "Sneakers".into(),
                slug: None,
            })
            .await
            .unwrap_err();
        assert_eq!(
            orphan.entity_error::<CategoryError>(),
            Some(&CategoryError::UnknownParent(ParentCategoryId(9)))
        );

        let parent = parents
            .create(ParentCategoryCreate {
                name: "Shoes".into(),
                slug: None,
            })
            .await
            .unwrap();
        let id = children
            .create(ChildCategoryCreate {
                parent_category_id: parent,
                name: "Running Shoes".into(),
                slug: None,
            })
            .await
            .unwrap();
        let child = children.get(id).await.unwrap().unwrap();
        assert_eq!(child.slug, "running-shoes");
        assert_eq!(child.parent_category_id, parent);
    }
}
