//! Bilingual message catalogue.
//!
//! Every response the API produces, success or failure, carries a
//! machine-readable [`MessageKey`] and the matching Spanish/English text.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Human-readable text in both supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedMessage {
    /// Spanish text.
    pub es: &'static str,
    /// English text.
    pub en: &'static str,
}

impl LocalizedMessage {
    const fn new(es: &'static str, en: &'static str) -> Self {
        Self { es, en }
    }
}

/// Catalogue key identifying a response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    // Generic errors
    ErrorValidation,
    ErrorUnauthorized,
    ErrorForbidden,
    ErrorNotFound,
    ErrorConflict,
    ErrorInternal,

    // Branch resolution
    BranchUnassigned,
    BranchUndetermined,
    BranchInvalidUuid,
    BranchNotFound,
    BranchInactive,

    // RBAC lookups
    RoleNotFound,
    ModuleNotFound,
    PermissionNotFound,
    AssignmentNotFound,
    RoleNameTaken,
    ModuleNameTaken,
    PermissionNameTaken,
    RoleInUse,
    ModuleInUse,

    // Success
    Success,
    RolePermissionAssigned,
    RolePermissionUpdated,
    RolePermissionRemoved,
    RolePermissionFound,
    RoleModuleAssigned,
    RoleModuleUpdated,
    RoleModuleRemoved,
    RoleModuleFound,
    RoleCreated,
    RoleFound,
    RoleUpdated,
    RoleDeleted,
    ModuleCreated,
    ModuleFound,
    ModuleUpdated,
    ModuleDeleted,
    PermissionCreated,
    PermissionFound,
    PermissionUpdated,
    PermissionDeleted,
    UserProfileFetched,
    AdminBranchFilterSet,
    AdminBranchFilterCleared,
    AdminBranchFilterFetched,
    BranchContextFetched,
}

impl MessageKey {
    /// The dotted key sent to clients.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ErrorValidation => "ERROR.VALIDATION",
            Self::ErrorUnauthorized => "ERROR.UNAUTHORIZED",
            Self::ErrorForbidden => "ERROR.FORBIDDEN",
            Self::ErrorNotFound => "ERROR.NOT_FOUND",
            Self::ErrorConflict => "ERROR.CONFLICT",
            Self::ErrorInternal => "ERROR.INTERNAL",
            Self::BranchUnassigned => "BRANCH.UNASSIGNED",
            Self::BranchUndetermined => "BRANCH.UNDETERMINED",
            Self::BranchInvalidUuid => "BRANCH.INVALID_UUID",
            Self::BranchNotFound => "BRANCH.NOT_FOUND",
            Self::BranchInactive => "BRANCH.INACTIVE",
            Self::RoleNotFound => "ROLE.NOT_FOUND",
            Self::ModuleNotFound => "MODULE.NOT_FOUND",
            Self::PermissionNotFound => "PERMISSION.NOT_FOUND",
            Self::AssignmentNotFound => "ASSIGNMENT.NOT_FOUND",
            Self::RoleNameTaken => "ROLE.NAME_TAKEN",
            Self::ModuleNameTaken => "MODULE.NAME_TAKEN",
            Self::PermissionNameTaken => "PERMISSION.NAME_TAKEN",
            Self::RoleInUse => "ROLE.IN_USE",
            Self::ModuleInUse => "MODULE.IN_USE",
            Self::Success => "SUCCESS",
            Self::RolePermissionAssigned => "ROLE_PERMISSION.ASSIGNED",
            Self::RolePermissionUpdated => "ROLE_PERMISSION.UPDATED",
            Self::RolePermissionRemoved => "ROLE_PERMISSION.REMOVED",
            Self::RolePermissionFound => "ROLE_PERMISSION.FOUND",
            Self::RoleModuleAssigned => "ROLE_MODULE.ASSIGNED",
            Self::RoleModuleUpdated => "ROLE_MODULE.UPDATED",
            Self::RoleModuleRemoved => "ROLE_MODULE.REMOVED",
            Self::RoleModuleFound => "ROLE_MODULE.FOUND",
            Self::RoleCreated => "ROLE.CREATED",
            Self::RoleFound => "ROLE.FOUND",
            Self::RoleUpdated => "ROLE.UPDATED",
            Self::RoleDeleted => "ROLE.DELETED",
            Self::ModuleCreated => "MODULE.CREATED",
            Self::ModuleFound => "MODULE.FOUND",
            Self::ModuleUpdated => "MODULE.UPDATED",
            Self::ModuleDeleted => "MODULE.DELETED",
            Self::PermissionCreated => "PERMISSION.CREATED",
            Self::PermissionFound => "PERMISSION.FOUND",
            Self::PermissionUpdated => "PERMISSION.UPDATED",
            Self::PermissionDeleted => "PERMISSION.DELETED",
            Self::UserProfileFetched => "USER.PROFILE_FETCHED",
            Self::AdminBranchFilterSet => "ADMIN_BRANCH_FILTER.SET",
            Self::AdminBranchFilterCleared => "ADMIN_BRANCH_FILTER.CLEARED",
            Self::AdminBranchFilterFetched => "ADMIN_BRANCH_FILTER.FETCHED",
            Self::BranchContextFetched => "BRANCH_CONTEXT.FETCHED",
        }
    }

    /// The Spanish/English text for this key.
    pub fn localized(&self) -> LocalizedMessage {
        match self {
            Self::ErrorValidation => LocalizedMessage::new(
                "Error de validación",
                "Validation error",
            ),
            Self::ErrorUnauthorized => LocalizedMessage::new(
                "No autorizado",
                "Unauthorized",
            ),
            Self::ErrorForbidden => LocalizedMessage::new(
                "No tiene permisos para realizar esta acción",
                "You do not have permission to perform this action",
            ),
            Self::ErrorNotFound => LocalizedMessage::new(
                "Recurso no encontrado",
                "Resource not found",
            ),
            Self::ErrorConflict => LocalizedMessage::new(
                "El recurso ya existe o está en uso",
                "The resource already exists or is in use",
            ),
            Self::ErrorInternal => LocalizedMessage::new(
                "Error interno del servidor",
                "Internal server error",
            ),
            Self::BranchUnassigned => LocalizedMessage::new(
                "El usuario no tiene una sucursal asignada. Contacte al administrador.",
                "User does not have an assigned branch. Contact the administrator.",
            ),
            Self::BranchUndetermined => LocalizedMessage::new(
                "No se pudo determinar la sucursal. Verifique que el usuario tenga una sucursal asignada.",
                "Could not determine branch. Please verify that the user has an assigned branch.",
            ),
            Self::BranchInvalidUuid => LocalizedMessage::new(
                "El formato del branch ID debe ser UUID válido",
                "Branch ID must be a valid UUID format",
            ),
            Self::BranchNotFound => LocalizedMessage::new(
                "Sucursal no encontrada",
                "Branch not found",
            ),
            Self::BranchInactive => LocalizedMessage::new(
                "La sucursal no está activa",
                "Branch is not active",
            ),
            Self::RoleNotFound => LocalizedMessage::new(
                "Rol no encontrado",
                "Role not found",
            ),
            Self::ModuleNotFound => LocalizedMessage::new(
                "Módulo no encontrado",
                "Module not found",
            ),
            Self::PermissionNotFound => LocalizedMessage::new(
                "Permiso no encontrado",
                "Permission not found",
            ),
            Self::AssignmentNotFound => LocalizedMessage::new(
                "Asignación no encontrada",
                "Assignment not found",
            ),
            Self::RoleNameTaken => LocalizedMessage::new(
                "El nombre del rol ya existe",
                "Role name already exists",
            ),
            Self::ModuleNameTaken => LocalizedMessage::new(
                "El nombre del módulo ya existe",
                "Module name already exists",
            ),
            Self::PermissionNameTaken => LocalizedMessage::new(
                "El nombre del permiso ya existe en este módulo",
                "Permission name already exists in this module",
            ),
            Self::RoleInUse => LocalizedMessage::new(
                "No se puede eliminar un rol con usuarios asociados",
                "Cannot delete role with associated users",
            ),
            Self::ModuleInUse => LocalizedMessage::new(
                "No se puede eliminar un módulo con permisos asociados",
                "Cannot delete module with associated permissions",
            ),
            Self::Success => LocalizedMessage::new(
                "Operación completada",
                "Operation completed",
            ),
            Self::RolePermissionAssigned => LocalizedMessage::new(
                "Permiso asignado al rol",
                "Permission assigned to role",
            ),
            Self::RolePermissionUpdated => LocalizedMessage::new(
                "Asignación de permiso actualizada",
                "Permission assignment updated",
            ),
            Self::RolePermissionRemoved => LocalizedMessage::new(
                "Permiso removido del rol",
                "Permission removed from role",
            ),
            Self::RolePermissionFound => LocalizedMessage::new(
                "Permisos del rol obtenidos",
                "Role permissions retrieved",
            ),
            Self::RoleModuleAssigned => LocalizedMessage::new(
                "Módulo asignado al rol",
                "Module assigned to role",
            ),
            Self::RoleModuleUpdated => LocalizedMessage::new(
                "Asignación de módulo actualizada",
                "Module assignment updated",
            ),
            Self::RoleModuleRemoved => LocalizedMessage::new(
                "Módulo removido del rol",
                "Module removed from role",
            ),
            Self::RoleModuleFound => LocalizedMessage::new(
                "Módulos del rol obtenidos",
                "Role modules retrieved",
            ),
            Self::RoleCreated => LocalizedMessage::new("Rol creado", "Role created"),
            Self::RoleFound => LocalizedMessage::new("Roles obtenidos", "Roles retrieved"),
            Self::RoleUpdated => LocalizedMessage::new("Rol actualizado", "Role updated"),
            Self::RoleDeleted => LocalizedMessage::new("Rol eliminado", "Role deleted"),
            Self::ModuleCreated => LocalizedMessage::new("Módulo creado", "Module created"),
            Self::ModuleFound => LocalizedMessage::new("Módulos obtenidos", "Modules retrieved"),
            Self::ModuleUpdated => LocalizedMessage::new("Módulo actualizado", "Module updated"),
            Self::ModuleDeleted => LocalizedMessage::new("Módulo eliminado", "Module deleted"),
            Self::PermissionCreated => {
                LocalizedMessage::new("Permiso creado", "Permission created")
            }
            Self::PermissionFound => {
                LocalizedMessage::new("Permisos obtenidos", "Permissions retrieved")
            }
            Self::PermissionUpdated => {
                LocalizedMessage::new("Permiso actualizado", "Permission updated")
            }
            Self::PermissionDeleted => {
                LocalizedMessage::new("Permiso eliminado", "Permission deleted")
            }
            Self::UserProfileFetched => LocalizedMessage::new(
                "Perfil de usuario obtenido",
                "User profile retrieved",
            ),
            Self::AdminBranchFilterSet => LocalizedMessage::new(
                "Filtro de sucursal establecido",
                "Branch filter set",
            ),
            Self::AdminBranchFilterCleared => LocalizedMessage::new(
                "Filtro de sucursal eliminado",
                "Branch filter cleared",
            ),
            Self::AdminBranchFilterFetched => LocalizedMessage::new(
                "Filtro de sucursal obtenido",
                "Branch filter retrieved",
            ),
            Self::BranchContextFetched => LocalizedMessage::new(
                "Contexto de sucursal obtenido",
                "Branch context retrieved",
            ),
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MessageKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_serializes_as_dotted_string() {
        let json = serde_json::to_string(&MessageKey::BranchInvalidUuid).expect("serialize");
        assert_eq!(json, "\"BRANCH.INVALID_UUID\"");
    }

    #[test]
    fn test_branch_messages_are_bilingual() {
        let msg = MessageKey::BranchInactive.localized();
        assert_eq!(msg.es, "La sucursal no está activa");
        assert_eq!(msg.en, "Branch is not active");
    }
}
