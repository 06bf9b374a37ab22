pub const MINIMAL_DOCUMENT: &str = "%SPDF-1.0
1 0 obj
<< /Type /Catalog /Pages 2 0 R >>
endobj
2 0 obj
<< /Type /Pages /Kids [ ] /Count 0 >>
endobj
xref
0 3
0000000000 65535 f
0000000010 00000 n
0000000062 00000 n
trailer
<< /Size 3 /Root 1 0 R >>
startxref
110
%%EOF
";

pub const STREAM_DOCUMENT: &str = "%SPDF-1.1
% objects follow
3 0 obj
<< /Length 24 /Rect [ 0 0 612.0 -792 ] /Title (A title) /Open false /Parent null >>
stream
BT obj ( ] >> endobj
%%EOF ET
endstream
endobj
xref
0 1
0000000000 65535 f
trailer
<< /Size 1 /Info << /Producer (spdf) >> >>
startxref
200
%%EOF
";
