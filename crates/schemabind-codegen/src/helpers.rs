//! Shared helper units written once per run at the output root.

use crate::text::banner;
use schemabind_core::{GeneratorConfig, HASH_MULTIPLIER, HASH_SEED};

/// Base interfaces and generic lifecycle op templates.
pub const INTERFACE_HEADER: &str = "ExternalSchemaInterface.h";

/// String and bytes schema accessors.
pub const HELPER_FUNCTIONS_HEADER: &str = "ExternalSchemaHelperFunctions.h";

/// Generic map equality.
pub const MAP_EQUALS_HEADER: &str = "MapEquals.h";

/// `(path, contents)` of every helper unit.
pub fn helper_units(config: &GeneratorConfig) -> Vec<(String, String)> {
    vec![
        (INTERFACE_HEADER.to_string(), interface_header(config)),
        (HELPER_FUNCTIONS_HEADER.to_string(), helper_functions_header(config)),
        (MAP_EQUALS_HEADER.to_string(), map_equals_header(config)),
    ]
}

fn interface_header(config: &GeneratorConfig) -> String {
    let option = &config.containers.option;
    let string = &config.containers.string;
    let list = &config.containers.list;

    let mut code = banner(config);
    code.push_str(
        r#"#pragma once

#include "CoreMinimal.h"
#include "Utils/SchemaOption.h"
#include <WorkerSDK/improbable/c_schema.h>
#include <WorkerSDK/improbable/c_worker.h>

namespace improbable
{

class SpatialType
{
public:
	virtual ~SpatialType() = default;
	virtual void Serialize(Schema_Object* SchemaObject) const = 0;
};

class SpatialComponent : public SpatialType
{
public:
	using SpatialType::Serialize;
	virtual Worker_ComponentId GetComponentId() const = 0;
	virtual void Serialize(Schema_ComponentData* SchemaData) const = 0;
};

class SpatialComponentUpdate
{
public:
	virtual ~SpatialComponentUpdate() = default;
	virtual Worker_ComponentId GetComponentId() const = 0;
	virtual void Serialize(Schema_ComponentUpdate* SchemaUpdate) const = 0;
};

template <typename T>
struct AddComponentOp
{
	Worker_EntityId EntityId;
	T Data;
};

template <typename T>
struct RemoveComponentOp
{
	Worker_EntityId EntityId;
};

template <typename T>
struct ComponentUpdateOp
{
	Worker_EntityId EntityId;
	T Update;
};

template <typename T>
struct AuthorityChangeOp
{
	Worker_EntityId EntityId;
	Worker_Authority Authority;
};

template <typename T>
struct CommandRequestOp
{
	Worker_EntityId EntityId;
	Worker_RequestId RequestId;
	uint32 TimeoutMillis;
"#,
    );
    code.push_str(&format!("\t{string} CallerWorkerId;\n"));
    code.push_str(&format!("\t{list}<{string}> CallerAttributeSet;\n"));
    code.push_str(
        r#"	T Request;
};

template <typename T>
struct CommandResponseOp
{
	Worker_EntityId EntityId;
	Worker_RequestId RequestId;
	uint8 StatusCode;
"#,
    );
    code.push_str(&format!("\t{string} Message;\n"));
    code.push_str(&format!("\t{option}<T> Response;\n"));
    code.push_str("};\n\n} // namespace improbable\n");
    code
}

fn helper_functions_header(config: &GeneratorConfig) -> String {
    let string = &config.containers.string;
    let bytes = &config.containers.bytes;

    let mut code = banner(config);
    code.push_str("#pragma once\n\n#include \"CoreMinimal.h\"\n");
    code.push_str("#include <WorkerSDK/improbable/c_schema.h>\n\n");
    code.push_str("namespace improbable\n{\nnamespace utils\n{\n\n");

    code.push_str(&format!(
        "inline void AddStringToSchema(Schema_Object* Object, Schema_FieldId Id, const {string}& Value)\n\
         {{\n\
         \tFTCHARToUTF8 Utf8(*Value);\n\
         \tconst uint32 Length = Utf8.Length();\n\
         \tuint8* Buffer = Schema_AllocateBuffer(Object, Length);\n\
         \tFMemory::Memcpy(Buffer, Utf8.Get(), Length);\n\
         \tSchema_AddBytes(Object, Id, Buffer, Length);\n\
         }}\n\n"
    ));
    code.push_str(&format!(
        "inline {string} StringFromBytes(const uint8* Data, uint32 Length)\n\
         {{\n\
         \treturn {string}(Length, UTF8_TO_TCHAR(reinterpret_cast<const ANSICHAR*>(Data)));\n\
         }}\n\n"
    ));
    code.push_str(&format!(
        "inline {string} GetStringFromSchema(Schema_Object* Object, Schema_FieldId Id)\n\
         {{\n\
         \treturn StringFromBytes(Schema_GetBytes(Object, Id), Schema_GetBytesLength(Object, Id));\n\
         }}\n\n"
    ));
    code.push_str(&format!(
        "inline {string} IndexStringFromSchema(Schema_Object* Object, Schema_FieldId Id, uint32 Index)\n\
         {{\n\
         \treturn StringFromBytes(Schema_IndexBytes(Object, Id, Index), Schema_IndexBytesLength(Object, Id, Index));\n\
         }}\n\n"
    ));
    code.push_str(&format!(
        "inline void AddBytesToSchema(Schema_Object* Object, Schema_FieldId Id, const {bytes}& Value)\n\
         {{\n\
         \tconst uint32 Length = static_cast<uint32>(Value.Num());\n\
         \tuint8* Buffer = Schema_AllocateBuffer(Object, Length);\n\
         \tFMemory::Memcpy(Buffer, Value.GetData(), Length);\n\
         \tSchema_AddBytes(Object, Id, Buffer, Length);\n\
         }}\n\n"
    ));
    code.push_str(&format!(
        "inline {bytes} GetBytesFromSchema(Schema_Object* Object, Schema_FieldId Id)\n\
         {{\n\
         \treturn {bytes}(Schema_GetBytes(Object, Id), Schema_GetBytesLength(Object, Id));\n\
         }}\n\n"
    ));
    code.push_str(&format!(
        "inline {bytes} IndexBytesFromSchema(Schema_Object* Object, Schema_FieldId Id, uint32 Index)\n\
         {{\n\
         \treturn {bytes}(Schema_IndexBytes(Object, Id, Index), Schema_IndexBytesLength(Object, Id, Index));\n\
         }}\n\n"
    ));
    code.push_str(&format!(
        "inline uint32 GetBytesHash(const {bytes}& Value)\n\
         {{\n\
         \tuint32 Result = {HASH_SEED};\n\
         \tfor (const uint8 Byte : Value)\n\
         \t{{\n\
         \t\tResult = (Result * {HASH_MULTIPLIER}) + Byte;\n\
         \t}}\n\
         \treturn Result;\n\
         }}\n\n"
    ));

    code.push_str("} // namespace utils\n} // namespace improbable\n");
    code
}

fn map_equals_header(config: &GeneratorConfig) -> String {
    let map = &config.containers.map;

    let mut code = banner(config);
    code.push_str("#pragma once\n\n#include \"CoreMinimal.h\"\n\n");
    code.push_str("namespace improbable\n{\n\n");
    code.push_str(&format!(
        "template <typename K, typename V>\n\
         bool MapEquals(const {map}<K, V>& Lhs, const {map}<K, V>& Rhs)\n\
         {{\n\
         \tif (Lhs.Num() != Rhs.Num())\n\
         \t{{\n\
         \t\treturn false;\n\
         \t}}\n\
         \tfor (const auto& Pair : Lhs)\n\
         \t{{\n\
         \t\tconst V* Other = Rhs.Find(Pair.Key);\n\
         \t\tif (Other == nullptr || !(*Other == Pair.Value))\n\
         \t\t{{\n\
         \t\t\treturn false;\n\
         \t\t}}\n\
         \t}}\n\
         \treturn true;\n\
         }}\n\n"
    ));
    code.push_str("} // namespace improbable\n");
    code
}
